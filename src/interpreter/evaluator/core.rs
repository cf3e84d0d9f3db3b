use tracing::debug;

use crate::{
    error::{Error, RuntimeError},
    interpreter::{
        function::core::{Body, Function, FunctionTable, NativeFn, Parameter},
        function::native,
        lexer::tokenize,
        runtime::Runtime,
        scope::GLOBAL,
        symbol::SymbolTable,
        token_stream::TokenStream,
        value::{core::Value, primitive::PrimitiveType},
    },
};

/// Result type used by the evaluator.
///
/// Parsing and evaluation are one step, so evaluation functions fail with
/// either a parse or a runtime error.
pub type EvalResult<T> = Result<T, Error>;

/// Deepest nesting of function calls a program may reach.
///
/// Every call recurses through the evaluator on the native stack, so the bound
/// keeps runaway recursion a `RuntimeError` instead of a stack overflow.
pub const MAX_CALL_DEPTH: usize = 200;

/// How a statement or block finished.
///
/// A block stops at the first statement that does not finish `Normal` and
/// hands the signal to its enclosing construct. Loops absorb `Breaking` and
/// `Continuing`; only a function call absorbs `Returning`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is unwinding to the function boundary.
    Returning(Value),
    /// A `break` is unwinding to the innermost loop.
    Breaking,
    /// A `continue` is unwinding to the innermost loop.
    Continuing,
}

impl Signal {
    /// Whether the signal interrupts the enclosing block.
    #[must_use]
    pub const fn is_abrupt(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// The combined parser and evaluator.
///
/// Owns the token stream, the runtime state and the function table. Every
/// construct is executed the moment it is recognized; loop bodies and
/// function bodies are re-read from checkpoints instead of being kept as a
/// tree.
///
/// # Example
/// ```
/// use entity::interpreter::{evaluator::core::Interpreter, value::core::Value};
///
/// let mut interpreter =
///     Interpreter::new("int total = 0; int main() { total = 4 * 5; return total; }").unwrap();
///
/// assert_eq!(interpreter.run().unwrap(), Value::Int(20));
/// assert_eq!(interpreter.global("total"), Some(Value::Int(20)));
/// ```
#[derive(Debug)]
pub struct Interpreter {
    pub(crate) tokens:    TokenStream,
    pub(crate) runtime:   Runtime,
    pub(crate) functions: FunctionTable,
    pub(crate) depth:     usize,
}

impl Interpreter {
    /// Lexes `source` and registers the `new` and `del` natives.
    ///
    /// # Errors
    /// Any lexical error in `source`.
    pub fn new(source: &str) -> EvalResult<Self> {
        let mut symbols = SymbolTable::new();
        let tokens = tokenize(source, &mut symbols)?;

        let mut interpreter = Self { tokens,
                                     runtime: Runtime::new(symbols),
                                     functions: FunctionTable::new(),
                                     depth: 0 };

        interpreter.register_native("new", PrimitiveType::Entity, &[], native::new_entity)?;
        interpreter.register_native("del",
                                    PrimitiveType::Void,
                                    &[("e", PrimitiveType::Entity)],
                                    native::del_entity)?;

        Ok(interpreter)
    }

    /// Registers a host function.
    ///
    /// The callback runs with a fresh scope holding one variable per
    /// parameter, named as given here.
    ///
    /// # Errors
    /// `RuntimeError::DuplicateFunction` if the name is taken.
    pub fn register_native(&mut self,
                           name: &str,
                           return_type: PrimitiveType,
                           params: &[(&str, PrimitiveType)],
                           callback: NativeFn)
                           -> EvalResult<()> {
        let params = params.iter()
                           .map(|(name, ty)| Parameter { name: self.runtime.symbols.intern(name),
                                                         ty:   *ty, })
                           .collect();
        let function = Function { name: self.runtime.symbols.intern(name),
                                  return_type,
                                  params,
                                  body: Body::Native(callback) };

        self.register(function, 0)
    }

    /// Adds a function to the table.
    pub(crate) fn register(&mut self, function: Function, line: usize) -> EvalResult<()> {
        debug!(name = self.runtime.name(function.name),
               params = function.params.len(),
               returns = %function.return_type,
               "register function");

        self.functions.register(function).map_err(|function| {
                                              RuntimeError::DuplicateFunction { name: self.runtime
                                                                                          .name(function.name)
                                                                                          .to_string(),
                                                                                line }.into()
                                          })
    }

    /// Loads the program, then calls `main` with no arguments.
    ///
    /// # Errors
    /// The first parse or runtime error of the run.
    pub fn run(&mut self) -> EvalResult<Value> {
        self.load()?;
        self.call_main()
    }

    /// Calls `main` with no arguments through the ordinary call protocol.
    ///
    /// # Errors
    /// `RuntimeError::MainNotFound` if the program defines no `main`,
    /// `RuntimeError::ReturnTypeMismatch` if `main` is not declared `int`, or
    /// any error raised while running it.
    pub fn call_main(&mut self) -> EvalResult<Value> {
        let main = self.runtime.symbols.intern("main");
        let function = self.functions.resolve(main).ok_or(RuntimeError::MainNotFound)?;
        let line = self.tokens.line();

        if !function.params.is_empty() {
            return Err(RuntimeError::TooFewArguments { function: "main".to_string(),
                                                       required: function.params.len(),
                                                       provided: 0,
                                                       line }.into());
        }

        if function.return_type != PrimitiveType::Int {
            return Err(RuntimeError::ReturnTypeMismatch { function: "main".to_string(),
                                                          expected: PrimitiveType::Int,
                                                          actual: function.return_type,
                                                          line }.into());
        }

        debug!("calling main");
        let caller = self.runtime.scopes.current();
        let callee = self.runtime.scopes.push_scope();
        self.invoke(&function, caller, callee, line)
    }

    /// Reads a global variable, for hosts inspecting a finished run.
    pub fn global(&mut self, name: &str) -> Option<Value> {
        let name = self.runtime.symbols.get(name)?;
        self.runtime.scopes.lookup_from(GLOBAL, name).copied()
    }

    /// The runtime state: scopes, entities and symbols.
    #[must_use]
    pub const fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// The token stream.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStream {
        &self.tokens
    }
}
