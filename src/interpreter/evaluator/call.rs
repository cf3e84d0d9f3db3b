use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter, MAX_CALL_DEPTH, Signal},
        function::core::{Body, Function},
        lexer::Token,
        scope::{GLOBAL, ScopeId},
        value::core::Value,
    },
};

impl Interpreter {
    /// Evaluates a function call.
    ///
    /// The rule is: `call := identifier "(" (expression ("," expression)*)? ")"`
    ///
    /// The callee scope is opened before the arguments are read. Each
    /// argument is evaluated in the caller's scope and then bound in the
    /// callee scope under its parameter name, so arguments are checked and
    /// bound one at a time, left to right.
    ///
    /// # Returns
    /// The value the function produced, with the cursor after `)`.
    pub fn call(&mut self) -> EvalResult<Value> {
        let line = self.tokens.line();
        let name = self.tokens.expect_identifier()?;
        let function = self.functions
                           .resolve(name)
                           .ok_or_else(|| RuntimeError::UndefinedFunction { name: self.runtime
                                                                                      .name(name)
                                                                                      .to_string(),
                                                                            line })?;

        let caller = self.runtime.scopes.current();
        let callee = self.runtime.scopes.push_scope();

        self.tokens.expect(&Token::LParen)?;
        let mut provided = 0;
        if !self.tokens.at(&Token::RParen) {
            loop {
                let Some(param) = function.params.get(provided).copied() else {
                    return Err(RuntimeError::TooManyArguments { function: self.function_name(&function),
                                                                required: function.params.len(),
                                                                line:     self.tokens.line(), }.into());
                };

                self.runtime.scopes.set_current(caller);
                let arg_line = self.tokens.line();
                let value = self.expression()?;
                provided += 1;

                if value.ty() != param.ty {
                    return Err(RuntimeError::TypeMismatch { function: self.function_name(&function),
                                                            position: provided,
                                                            expected: param.ty,
                                                            actual:   value.ty(),
                                                            line:     arg_line, }.into());
                }

                self.runtime.scopes.set_current(callee);
                self.runtime.declare(param.name, value, arg_line)?;

                if !self.tokens.at(&Token::Comma) {
                    break;
                }
                self.tokens.advance();
            }
        }
        self.runtime.scopes.set_current(callee);
        self.tokens.expect(&Token::RParen)?;

        if provided < function.params.len() {
            return Err(RuntimeError::TooFewArguments { function: self.function_name(&function),
                                                       required: function.params.len(),
                                                       provided,
                                                       line }.into());
        }

        self.invoke(&function, caller, callee, line)
    }

    /// Runs a function whose arguments are already bound in `callee`.
    ///
    /// The callee scope is re-rooted at the global scope so the body sees
    /// its parameters, its own locals and globals, never the caller's
    /// locals. Afterwards the callee scope is destroyed and `caller` is
    /// active again.
    ///
    /// Calls nest at most [`MAX_CALL_DEPTH`] deep; a deeper call fails with
    /// `RuntimeError::RecursionLimit` before the native stack runs out.
    pub(crate) fn invoke(&mut self,
                         function: &Function,
                         caller: ScopeId,
                         callee: ScopeId,
                         line: usize)
                         -> EvalResult<Value> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { function: self.function_name(function),
                                                      limit: MAX_CALL_DEPTH,
                                                      line }.into());
        }

        debug!(function = self.runtime.name(function.name), depth = self.depth, line, "call");
        self.runtime.scopes.reparent(callee, GLOBAL);

        self.depth += 1;
        let result = self.run_body(function, line);
        self.depth -= 1;
        let value = result?;

        if value.ty() != function.return_type {
            return Err(RuntimeError::ReturnTypeMismatch { function: self.function_name(function),
                                                          expected: function.return_type,
                                                          actual: value.ty(),
                                                          line }.into());
        }

        self.runtime.scopes.pop_scope();
        self.runtime.scopes.set_current(caller);
        Ok(value)
    }

    /// Runs a native callback or a source body and turns its final signal
    /// into the call's value.
    fn run_body(&mut self, function: &Function, line: usize) -> EvalResult<Value> {
        match function.body {
            Body::Native(callback) => callback(&mut self.runtime, line),
            Body::Source(body) => {
                let resume = self.tokens.checkpoint();
                self.tokens.seek(body);
                let signal = self.block()?;
                let end = self.tokens.line();
                self.tokens.seek(resume);

                match signal {
                    Signal::Normal => Ok(Value::Void),
                    Signal::Returning(value) => Ok(value),
                    Signal::Breaking => {
                        Err(RuntimeError::BreakOutsideLoop { function: self.function_name(function),
                                                             line:     end, }.into())
                    },
                    Signal::Continuing => {
                        Err(RuntimeError::ContinueOutsideLoop { function: self.function_name(function),
                                                                line:     end, }.into())
                    },
                }
            },
        }
    }

    fn function_name(&self, function: &Function) -> String {
        self.runtime.name(function.name).to_string()
    }
}
