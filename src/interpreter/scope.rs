use tracing::trace;

use crate::interpreter::{symbol::Symbol, value::core::Value};

/// A named value owned by exactly one scope.
#[derive(Debug, Clone, PartialEq)]
struct Variable {
    /// The declared name.
    name:  Symbol,
    /// The current value.
    value: Value,
}

/// Identifies a live scope on a [`ScopeChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

/// The global scope, the root of every chain.
pub const GLOBAL: ScopeId = ScopeId(0);

/// One variable environment.
///
/// Variables keep their declaration order; a name occurs at most once per
/// scope.
#[derive(Debug, Default)]
struct Scope {
    variables: Vec<Variable>,
    parent:    Option<ScopeId>,
}

impl Scope {
    fn find_mut(&mut self, name: Symbol) -> Option<&mut Value> {
        self.variables
            .iter_mut()
            .find(|variable| variable.name == name)
            .map(|variable| &mut variable.value)
    }
}

/// The stack of variable environments.
///
/// Scopes are created and destroyed in strict LIFO order, so they live in a
/// vector indexed by [`ScopeId`]. Each scope also names a parent, and lookups
/// follow parent links from the *current* scope rather than walking the
/// vector: a function call re-roots its scope at [`GLOBAL`] so a callee never
/// sees its caller's locals.
///
/// # Example
/// ```
/// use entity::interpreter::{scope::ScopeChain, symbol::SymbolTable, value::core::Value};
///
/// let mut symbols = SymbolTable::new();
/// let x = symbols.intern("x");
/// let mut scopes = ScopeChain::new();
///
/// scopes.declare(x, Value::Int(1)).unwrap();
/// scopes.push_scope();
/// scopes.declare(x, Value::Int(2)).unwrap();
/// assert_eq!(scopes.lookup(x).copied(), Some(Value::Int(2)));
///
/// scopes.pop_scope();
/// assert_eq!(scopes.lookup(x).copied(), Some(Value::Int(1)));
/// ```
#[derive(Debug)]
pub struct ScopeChain {
    scopes:  Vec<Scope>,
    current: ScopeId,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeChain {
    /// Creates a chain holding only the empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes:  vec![Scope::default()],
               current: GLOBAL, }
    }

    /// The scope declarations go into and lookups start from.
    #[must_use]
    pub const fn current(&self) -> ScopeId {
        self.current
    }

    /// Makes `scope` the active scope.
    pub fn set_current(&mut self, scope: ScopeId) {
        self.current = scope;
    }

    /// Number of live scopes, the global scope included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Opens a new scope parented at the current one and makes it current.
    pub fn push_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope { variables: Vec::new(),
                                 parent:    Some(self.current), });
        self.current = id;
        trace!(depth = self.scopes.len(), "push scope");
        id
    }

    /// Destroys the innermost scope and every variable it owns.
    ///
    /// The current scope moves to the destroyed scope's parent. The global
    /// scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() <= 1 {
            return;
        }
        if let Some(scope) = self.scopes.pop() {
            self.current = scope.parent.unwrap_or(GLOBAL);
        }
        trace!(depth = self.scopes.len(), "pop scope");
    }

    /// Changes the scope lookups continue in after `scope`.
    pub fn reparent(&mut self, scope: ScopeId, parent: ScopeId) {
        if let Some(scope) = self.scopes.get_mut(scope.0) {
            scope.parent = Some(parent);
        }
    }

    /// Declares `name` in the current scope.
    ///
    /// # Errors
    /// Hands the value back if `name` is already declared directly in the
    /// current scope. Outer declarations of the same name are shadowed, not
    /// conflicts.
    pub fn declare(&mut self, name: Symbol, value: Value) -> Result<(), Value> {
        self.declare_in(self.current, name, value)
    }

    /// Declares `name` in `scope`.
    pub fn declare_in(&mut self, scope: ScopeId, name: Symbol, value: Value) -> Result<(), Value> {
        let Some(scope) = self.scopes.get_mut(scope.0) else {
            return Err(value);
        };
        if scope.find_mut(name).is_some() {
            return Err(value);
        }
        scope.variables.push(Variable { name, value });
        Ok(())
    }

    /// Resolves `name` starting from the current scope.
    pub fn lookup(&mut self, name: Symbol) -> Option<&mut Value> {
        self.lookup_from(self.current, name)
    }

    /// Resolves `name` starting from `scope` and following parent links up to
    /// the global scope.
    pub fn lookup_from(&mut self, scope: ScopeId, name: Symbol) -> Option<&mut Value> {
        let mut next = Some(scope);
        let mut found = None;

        while let Some(id) = next {
            let scope = self.scopes.get(id.0)?;
            if scope.variables.iter().any(|variable| variable.name == name) {
                found = Some(id);
                break;
            }
            next = scope.parent;
        }

        self.scopes.get_mut(found?.0)?.find_mut(name)
    }
}
