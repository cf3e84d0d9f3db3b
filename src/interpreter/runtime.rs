use crate::{
    error::RuntimeError,
    interpreter::{
        scope::ScopeChain,
        symbol::{Symbol, SymbolTable},
        value::{
            core::{Value, ValueResult},
            entity::{Entity, EntityHeap, EntityRef},
        },
    },
};

/// Where a reference expression points.
///
/// Values are copied out of their place, so a reference is resolved to a
/// place first and written through it later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Place {
    /// A variable on the active scope chain.
    Variable(Symbol),
    /// A member of a live entity.
    Member(EntityRef, Symbol),
}

/// The mutable state a program and its natives operate on.
///
/// Holds the scope chain, the entity heap and the symbol table. Natives
/// receive it with their own scope active and read their arguments through
/// [`Runtime::lookup`].
#[derive(Debug, Default)]
pub struct Runtime {
    /// The variable environments.
    pub scopes:   ScopeChain,
    /// Every live entity.
    pub entities: EntityHeap,
    /// Interned identifiers and string literals.
    pub symbols:  SymbolTable,
}

impl Runtime {
    /// Creates a runtime around an existing symbol table.
    #[must_use]
    pub fn new(symbols: SymbolTable) -> Self {
        Self { scopes: ScopeChain::new(),
               entities: EntityHeap::default(),
               symbols }
    }

    /// The text of a symbol.
    #[must_use]
    pub fn name(&self, symbol: Symbol) -> &str {
        self.symbols.resolve(symbol)
    }

    /// Declares `name` in the current scope.
    ///
    /// # Errors
    /// `RuntimeError::DuplicateVariable` if the current scope already declares
    /// `name`.
    pub fn declare(&mut self, name: Symbol, value: Value, line: usize) -> ValueResult<()> {
        self.scopes
            .declare(name, value)
            .map_err(|_| RuntimeError::DuplicateVariable { name: self.symbols
                                                                      .resolve(name)
                                                                      .to_string(),
                                                           line })
    }

    /// Resolves `name` on the active scope chain.
    ///
    /// # Errors
    /// `RuntimeError::UndefinedVariable` once the chain is exhausted.
    pub fn lookup(&mut self, name: Symbol, line: usize) -> ValueResult<&mut Value> {
        let symbols = &self.symbols;
        self.scopes
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: symbols.resolve(name)
                                                                          .to_string(),
                                                             line })
    }

    /// Returns the live entity behind a handle.
    ///
    /// # Errors
    /// `RuntimeError::DanglingEntity` for the null handle or a deleted entity.
    pub fn entity_mut(&mut self, entity: EntityRef, line: usize) -> ValueResult<&mut Entity> {
        self.entities
            .get_mut(entity)
            .ok_or(RuntimeError::DanglingEntity { line })
    }

    /// Returns a member of a live entity.
    ///
    /// # Errors
    /// `RuntimeError::NoSuchMember` if the entity has no member `name`.
    pub fn member(&mut self, entity: EntityRef, name: Symbol, line: usize)
                  -> ValueResult<&mut Value> {
        let symbols = &self.symbols;
        self.entities
            .get_mut(entity)
            .ok_or(RuntimeError::DanglingEntity { line })?
            .member_mut(name)
            .ok_or_else(|| RuntimeError::NoSuchMember { name: symbols.resolve(name).to_string(),
                                                        line })
    }

    /// Appends a member to a live entity.
    ///
    /// # Errors
    /// `RuntimeError::DuplicateMember` if the entity already has a member
    /// `name`.
    pub fn append_member(&mut self,
                         entity: EntityRef,
                         name: Symbol,
                         value: Value,
                         line: usize)
                         -> ValueResult<()> {
        if self.entity_mut(entity, line)?.append_member(name, value) {
            Ok(())
        } else {
            Err(RuntimeError::DuplicateMember { name: self.symbols.resolve(name).to_string(),
                                                line })
        }
    }

    /// Reads the value stored at a place.
    pub fn read(&mut self, place: Place, line: usize) -> ValueResult<Value> {
        match place {
            Place::Variable(name) => self.lookup(name, line).copied(),
            Place::Member(entity, name) => self.member(entity, name, line).copied(),
        }
    }

    /// Overwrites the value stored at a place.
    pub fn write(&mut self, place: Place, value: Value, line: usize) -> ValueResult<()> {
        let slot = match place {
            Place::Variable(name) => self.lookup(name, line)?,
            Place::Member(entity, name) => self.member(entity, name, line)?,
        };
        *slot = value;
        Ok(())
    }
}
