use tracing::debug;

use crate::interpreter::{
    evaluator::core::{EvalResult, Interpreter},
    function::core::{Body, Function, Parameter},
    lexer::Token,
};

impl Interpreter {
    /// Reads the top level of the program.
    ///
    /// The rule is: `program := global_declaration* function_definition*`
    ///
    /// Global declarations run immediately, in order, in the global scope.
    /// Function definitions are registered without executing their bodies.
    /// Afterwards the cursor sits on `Eof`.
    ///
    /// # Errors
    /// Any error raised by a global initializer, a malformed definition or a
    /// duplicate function name.
    ///
    /// # Example
    /// ```
    /// use entity::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut interpreter = Interpreter::new("int a = 2, b = a * 3; int main() { return b; }").unwrap();
    /// interpreter.load().unwrap();
    ///
    /// assert_eq!(interpreter.global("b"), Some(Value::Int(6)));
    /// ```
    pub fn load(&mut self) -> EvalResult<()> {
        debug!(tokens = self.tokens.len(), "loading program");

        while self.at_global_declaration()? {
            self.declaration()?;
        }

        while !self.tokens.at_end() {
            self.function_definition()?;
        }

        debug!(functions = self.functions.len(), "program loaded");
        Ok(())
    }

    /// Whether the cursor starts a global declaration rather than a function
    /// definition. Both begin with `TYPE ID`; a declaration continues with
    /// `=`, `,` or `;`.
    fn at_global_declaration(&mut self) -> EvalResult<bool> {
        if !matches!(self.tokens.current(), Token::Type(_)) {
            return Ok(false);
        }

        let start = self.tokens.checkpoint();
        self.tokens.advance();
        self.tokens.expect_identifier()?;
        let is_declaration = matches!(self.tokens.current(),
                                      Token::Equals | Token::Comma | Token::Semicolon);
        self.tokens.seek(start);

        Ok(is_declaration)
    }

    /// Registers one function definition.
    ///
    /// The rule is:
    /// `function_definition := type identifier "(" (type identifier ("," type identifier)*)? ")" block`
    ///
    /// The body is skipped; the function records a checkpoint at its `{`.
    fn function_definition(&mut self) -> EvalResult<()> {
        let return_type = self.tokens.expect_type()?;
        let line = self.tokens.line();
        let name = self.tokens.expect_identifier()?;

        self.tokens.expect(&Token::LParen)?;
        let mut params = Vec::new();
        if !self.tokens.at(&Token::RParen) {
            loop {
                let ty = self.tokens.expect_type()?;
                let name = self.tokens.expect_identifier()?;
                params.push(Parameter { name, ty });

                if !self.tokens.at(&Token::Comma) {
                    break;
                }
                self.tokens.advance();
            }
        }
        self.tokens.expect(&Token::RParen)?;

        let body = self.tokens.checkpoint();
        self.tokens.skip_block()?;

        self.register(Function { name,
                                 return_type,
                                 params,
                                 body: Body::Source(body) },
                      line)
    }
}
