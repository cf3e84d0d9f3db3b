use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::interpreter::{
    evaluator::core::EvalResult,
    runtime::Runtime,
    symbol::Symbol,
    token_stream::Checkpoint,
    value::{core::Value, primitive::PrimitiveType},
};

/// Type alias for native function handlers.
///
/// A native runs with the callee scope active, so it reads its arguments by
/// looking up its own parameter names on the runtime. The second argument is
/// the line of the call, for error reporting.
pub type NativeFn = fn(&mut Runtime, usize) -> EvalResult<Value>;

/// A declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    /// The name the argument is bound to in the callee scope.
    pub name: Symbol,
    /// The type the argument must have.
    pub ty:   PrimitiveType,
}

/// Where a function's behaviour comes from.
#[derive(Clone, Copy)]
pub enum Body {
    /// A host callback.
    Native(NativeFn),
    /// Source code; the checkpoint sits on the `{` opening the body.
    Source(Checkpoint),
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native(_) => f.write_str("Native"),
            Self::Source(checkpoint) => f.debug_tuple("Source").field(checkpoint).finish(),
        }
    }
}

/// A callable function. Never changes after registration.
#[derive(Debug, Clone)]
pub struct Function {
    /// The function name.
    pub name:        Symbol,
    /// The type every call must produce.
    pub return_type: PrimitiveType,
    /// Parameters in declaration order.
    pub params:      Vec<Parameter>,
    /// Native callback or source body.
    pub body:        Body,
}

/// Registry of every callable function, native and source-defined alike.
///
/// Entries are shared as `Rc` so a call holds its definition while its body
/// runs and resolves further calls against the same table.
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<Symbol, Rc<Function>>,
}

impl FunctionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function.
    ///
    /// # Errors
    /// Hands the function back if its name is already registered.
    pub fn register(&mut self, function: Function) -> Result<(), Function> {
        if self.functions.contains_key(&function.name) {
            return Err(function);
        }
        self.functions.insert(function.name, Rc::new(function));
        Ok(())
    }

    /// Finds a function by name.
    #[must_use]
    pub fn resolve(&self, name: Symbol) -> Option<Rc<Function>> {
        self.functions.get(&name).cloned()
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
