use crate::{
    error::{ParseError, RuntimeError},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, Signal},
        lexer::Token,
        value::core::Value,
    },
};

impl Interpreter {
    /// Executes one statement starting at the cursor.
    ///
    /// Dispatches on the first token:
    /// - `;` is the empty statement.
    /// - `{` opens a nested block with its own scope.
    /// - A type starts a declaration or a member append.
    /// - An identifier starts a call or an assignment.
    /// - `if`, `while`, `do`, `break`, `continue` and `return` start their
    ///   control-flow statements.
    ///
    /// # Returns
    /// How the statement finished. Anything but [`Signal::Normal`] leaves the
    /// cursor where the statement stopped; the construct absorbing the signal
    /// repositions it.
    pub fn statement(&mut self) -> EvalResult<Signal> {
        match self.tokens.current() {
            Token::Semicolon => {
                self.tokens.advance();
                Ok(Signal::Normal)
            },
            Token::LBrace => self.scoped_block(),
            Token::Type(_) => {
                self.typed_statement()?;
                Ok(Signal::Normal)
            },
            Token::Identifier(_) => {
                self.identifier_statement()?;
                Ok(Signal::Normal)
            },
            Token::If => self.if_statement(),
            Token::While => self.while_statement(),
            Token::Do => self.do_while_statement(),
            Token::Break => {
                self.tokens.advance();
                self.tokens.expect(&Token::Semicolon)?;
                Ok(Signal::Breaking)
            },
            Token::Continue => {
                self.tokens.advance();
                self.tokens.expect(&Token::Semicolon)?;
                Ok(Signal::Continuing)
            },
            Token::Return => self.return_statement(),
            other => Err(ParseError::ExpectedStatement { found: other.to_string(),
                                                         line:  self.tokens.line(), }.into()),
        }
    }

    /// Executes the statements of a brace-delimited block in the current
    /// scope.
    ///
    /// Stops at the first abrupt signal without consuming the rest of the
    /// block.
    pub fn block(&mut self) -> EvalResult<Signal> {
        self.tokens.expect(&Token::LBrace)?;

        while !self.tokens.at(&Token::RBrace) {
            if self.tokens.at_end() {
                return Err(self.tokens.unexpected(&Token::RBrace.to_string()).into());
            }

            let signal = self.statement()?;
            if signal.is_abrupt() {
                return Ok(signal);
            }
        }

        self.tokens.advance();
        Ok(Signal::Normal)
    }

    /// Executes a block inside a fresh scope, destroyed afterwards however
    /// the block finished.
    pub fn scoped_block(&mut self) -> EvalResult<Signal> {
        self.runtime.scopes.push_scope();
        let signal = self.block();
        self.runtime.scopes.pop_scope();
        signal
    }

    /// Executes a declaration list or a member append.
    ///
    /// The rules are:
    /// - `declaration := type identifier ("=" expression)? ("," identifier ("=" expression)?)* ";"`
    /// - `append := type identifier "." identifier "=" expression ";"`
    fn typed_statement(&mut self) -> EvalResult<()> {
        let start = self.tokens.checkpoint();
        self.tokens.advance();
        self.tokens.expect_identifier()?;
        let is_append = self.tokens.at(&Token::Dot);
        self.tokens.seek(start);

        if is_append {
            self.append_statement()
        } else {
            self.declaration()
        }
    }

    /// Declares one or more variables of the same type in the current scope.
    ///
    /// Variables without an initializer start as the zero value of the type.
    /// Each name is declared once its initializer has been evaluated, so an
    /// initializer sees the names declared before it in the same list.
    pub(crate) fn declaration(&mut self) -> EvalResult<()> {
        let ty = self.tokens.expect_type()?;

        loop {
            let line = self.tokens.line();
            let name = self.tokens.expect_identifier()?;

            let value = if self.tokens.at(&Token::Equals) {
                self.tokens.advance();
                let line = self.tokens.line();
                self.expression()?.convert(ty, line)?
            } else {
                Value::zero(ty)
            };
            self.runtime.declare(name, value, line)?;

            if !self.tokens.at(&Token::Comma) {
                break;
            }
            self.tokens.advance();
        }

        Ok(self.tokens.expect(&Token::Semicolon)?)
    }

    /// Appends a typed member to an entity held in a variable.
    fn append_statement(&mut self) -> EvalResult<()> {
        let ty = self.tokens.expect_type()?;
        let line = self.tokens.line();
        let holder = self.tokens.expect_identifier()?;
        let entity = self.runtime.lookup(holder, line)?.as_entity(line)?;
        self.tokens.expect(&Token::Dot)?;

        let line = self.tokens.line();
        let member = self.tokens.expect_identifier()?;
        self.tokens.expect(&Token::Equals)?;
        let value = self.expression()?.convert(ty, line)?;
        self.tokens.expect(&Token::Semicolon)?;

        Ok(self.runtime.append_member(entity, member, value, line)?)
    }

    /// Executes a call statement or an assignment.
    ///
    /// The rules are:
    /// - `call_statement := call ";"`
    /// - `assignment := reference "=" expression ";"`
    fn identifier_statement(&mut self) -> EvalResult<()> {
        let start = self.tokens.checkpoint();
        self.tokens.advance();
        let is_call = self.tokens.at(&Token::LParen);
        self.tokens.seek(start);

        if is_call {
            self.call()?;
        } else {
            self.assignment()?;
        }

        Ok(self.tokens.expect(&Token::Semicolon)?)
    }

    /// Stores a new value at a reference.
    ///
    /// The target is resolved before the right-hand side is evaluated, and the
    /// stored value must keep the target's type.
    fn assignment(&mut self) -> EvalResult<()> {
        let (place, line) = self.reference()?;
        let expected = self.runtime.read(place, line)?.ty();
        self.tokens.expect(&Token::Equals)?;

        let value = self.expression()?;
        if value.ty() != expected {
            return Err(RuntimeError::AssignmentTypeMismatch { expected,
                                                              actual: value.ty(),
                                                              line }.into());
        }

        Ok(self.runtime.write(place, value, line)?)
    }

    /// Evaluates `return expression? ;`.
    fn return_statement(&mut self) -> EvalResult<Signal> {
        self.tokens.expect(&Token::Return)?;

        let value = if self.tokens.at(&Token::Semicolon) {
            Value::Void
        } else {
            self.expression()?
        };
        self.tokens.expect(&Token::Semicolon)?;

        Ok(Signal::Returning(value))
    }
}
