use tracing::trace;

use crate::interpreter::{
    evaluator::core::{EvalResult, Interpreter, Signal},
    lexer::Token,
};

impl Interpreter {
    /// Reads `( expression )` and interprets the value as a condition.
    fn condition(&mut self) -> EvalResult<bool> {
        self.tokens.expect(&Token::LParen)?;
        let line = self.tokens.line();
        let value = self.expression()?;
        self.tokens.expect(&Token::RParen)?;
        Ok(value.truth(line)?)
    }

    /// Executes an `if` statement with its optional `else` chain.
    ///
    /// The rule is:
    /// `if_statement := "if" "(" expression ")" block ("else" (if_statement | block))?`
    ///
    /// Exactly one branch runs; the others are skipped token by token without
    /// evaluating their conditions.
    pub(crate) fn if_statement(&mut self) -> EvalResult<Signal> {
        self.tokens.expect(&Token::If)?;

        if self.condition()? {
            let signal = self.scoped_block()?;
            if signal.is_abrupt() {
                return Ok(signal);
            }
            if self.tokens.at(&Token::Else) {
                self.tokens.advance();
                self.skip_else_branch()?;
            }
            return Ok(Signal::Normal);
        }

        self.tokens.skip_block()?;
        if !self.tokens.at(&Token::Else) {
            return Ok(Signal::Normal);
        }

        self.tokens.advance();
        if self.tokens.at(&Token::If) {
            self.if_statement()
        } else {
            self.scoped_block()
        }
    }

    /// Skips whatever follows an `else` whose `if` branch already ran.
    fn skip_else_branch(&mut self) -> EvalResult<()> {
        while self.tokens.at(&Token::If) {
            self.tokens.advance();
            self.tokens.skip_parenthesized()?;
            self.tokens.skip_block()?;

            if !self.tokens.at(&Token::Else) {
                return Ok(());
            }
            self.tokens.advance();
        }

        Ok(self.tokens.skip_block()?)
    }

    /// Executes a `while` loop.
    ///
    /// The condition is re-read from its checkpoint before every iteration.
    /// Once the loop ends, the cursor sits after the body.
    pub(crate) fn while_statement(&mut self) -> EvalResult<Signal> {
        self.tokens.expect(&Token::While)?;
        let head = self.tokens.checkpoint();

        loop {
            self.tokens.seek(head);
            let running = self.condition()?;
            let body = self.tokens.checkpoint();

            if !running {
                self.tokens.skip_block()?;
                return Ok(Signal::Normal);
            }

            trace!(line = self.tokens.line(), "while iteration");
            match self.scoped_block()? {
                Signal::Normal | Signal::Continuing => {},
                Signal::Breaking => {
                    self.tokens.seek(body);
                    self.tokens.skip_block()?;
                    return Ok(Signal::Normal);
                },
                returning @ Signal::Returning(_) => return Ok(returning),
            }
        }
    }

    /// Executes a `do ... while ( expression ) ;` loop.
    ///
    /// The body runs once before the condition is first evaluated.
    pub(crate) fn do_while_statement(&mut self) -> EvalResult<Signal> {
        self.tokens.expect(&Token::Do)?;
        let body = self.tokens.checkpoint();

        loop {
            self.tokens.seek(body);
            trace!(line = self.tokens.line(), "do-while iteration");

            match self.scoped_block()? {
                Signal::Normal => {},
                Signal::Continuing => {
                    self.tokens.seek(body);
                    self.tokens.skip_block()?;
                },
                Signal::Breaking => {
                    self.tokens.seek(body);
                    self.tokens.skip_block()?;
                    self.tokens.expect(&Token::While)?;
                    self.tokens.skip_parenthesized()?;
                    self.tokens.expect(&Token::Semicolon)?;
                    return Ok(Signal::Normal);
                },
                returning @ Signal::Returning(_) => return Ok(returning),
            }

            self.tokens.expect(&Token::While)?;
            let running = self.condition()?;
            self.tokens.expect(&Token::Semicolon)?;

            if !running {
                return Ok(Signal::Normal);
            }
        }
    }
}
