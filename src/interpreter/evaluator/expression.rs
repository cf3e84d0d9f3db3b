use crate::{
    error::ParseError,
    interpreter::{
        evaluator::{
            binary::{BinaryOperator, binary_op},
            core::{EvalResult, Interpreter},
        },
        lexer::Token,
        runtime::Place,
        value::core::Value,
    },
};

/// Maps a token to the binary operator it spells, if any.
const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        _ => None,
    }
}

impl Interpreter {
    /// Evaluates an expression starting at the cursor.
    ///
    /// The rule is: `comparison := additive (("<" | ">") additive)*`
    ///
    /// Comparisons chain left to right like the other levels, so `a < b < c`
    /// compares the `int` result of `a < b` with `c`.
    ///
    /// # Returns
    /// The value of the expression, with the cursor on the first token after
    /// it.
    ///
    /// # Example
    /// ```
    /// use entity::run;
    /// use entity::interpreter::value::core::Value;
    ///
    /// let value = run("int main() { return 1 + 2 * 3 < 8; }").unwrap();
    /// assert_eq!(value, Value::Int(1));
    /// ```
    pub fn expression(&mut self) -> EvalResult<Value> {
        let mut left = self.additive()?;
        loop {
            if let Some(op) = token_to_binary_operator(self.tokens.current())
               && op.is_comparison()
            {
                let line = self.tokens.line();
                self.tokens.advance();
                let right = self.additive()?;
                left = binary_op(left, op, right, line)?;
                continue;
            }
            break;
        }
        Ok(left)
    }

    /// Evaluates a left-associative chain of `+` and `-`.
    ///
    /// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
    fn additive(&mut self) -> EvalResult<Value> {
        let mut left = self.multiplicative()?;
        loop {
            if let Some(op) = token_to_binary_operator(self.tokens.current())
               && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
            {
                let line = self.tokens.line();
                self.tokens.advance();
                let right = self.multiplicative()?;
                left = binary_op(left, op, right, line)?;
                continue;
            }
            break;
        }
        Ok(left)
    }

    /// Evaluates a left-associative chain of `*`, `/` and `%`.
    ///
    /// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
    fn multiplicative(&mut self) -> EvalResult<Value> {
        let mut left = self.unary()?;
        loop {
            if let Some(op) = token_to_binary_operator(self.tokens.current())
               && matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
            {
                let line = self.tokens.line();
                self.tokens.advance();
                let right = self.unary()?;
                left = binary_op(left, op, right, line)?;
                continue;
            }
            break;
        }
        Ok(left)
    }

    /// Evaluates an optionally negated factor.
    ///
    /// Negation is subtraction from the zero of the operand's type, so it is
    /// defined exactly where binary `-` is.
    fn unary(&mut self) -> EvalResult<Value> {
        if self.tokens.at(&Token::Minus) {
            let line = self.tokens.line();
            self.tokens.advance();
            let operand = self.unary()?;
            return Ok(binary_op(Value::zero(operand.ty()), BinaryOperator::Sub, operand, line)?);
        }
        self.factor()
    }

    /// Evaluates a literal, a parenthesized expression, a call or a
    /// reference.
    fn factor(&mut self) -> EvalResult<Value> {
        let value = match self.tokens.current().clone() {
            Token::LParen => {
                self.tokens.advance();
                let value = self.expression()?;
                self.tokens.expect(&Token::RParen)?;
                return Ok(value);
            },
            Token::Integer(n) => Value::Int(n),
            Token::Float(x) => Value::Float(x),
            Token::Str(symbol) => Value::String(symbol),
            Token::Identifier(_) => {
                let start = self.tokens.checkpoint();
                self.tokens.advance();
                let is_call = self.tokens.at(&Token::LParen);
                self.tokens.seek(start);

                return if is_call {
                    self.call()
                } else {
                    let (place, line) = self.reference()?;
                    Ok(self.runtime.read(place, line)?)
                };
            },
            other => {
                return Err(ParseError::ExpectedExpression { found: other.to_string(),
                                                            line:  self.tokens.line(), }.into());
            },
        };

        self.tokens.advance();
        Ok(value)
    }

    /// Resolves a reference to the place it names.
    ///
    /// The rule is: `reference := identifier ("." identifier)*`
    ///
    /// Every prefix followed by `.` must hold an entity, and every member must
    /// exist at the time it is resolved.
    ///
    /// # Returns
    /// The place and the line of its last name.
    pub(crate) fn reference(&mut self) -> EvalResult<(Place, usize)> {
        let mut line = self.tokens.line();
        let mut place = Place::Variable(self.tokens.expect_identifier()?);

        while self.tokens.at(&Token::Dot) {
            let entity = self.runtime.read(place, line)?.as_entity(line)?;
            self.tokens.advance();

            line = self.tokens.line();
            let member = self.tokens.expect_identifier()?;
            self.runtime.member(entity, member, line)?;
            place = Place::Member(entity, member);
        }

        Ok((place, line))
    }
}
