use slotmap::SlotMap;

use crate::interpreter::{symbol::Symbol, value::core::Value};

slotmap::new_key_type! {
    /// Handle to an entity on the [`EntityHeap`].
    ///
    /// The default handle is null and never refers to a live entity.
    pub struct EntityRef;
}

/// An object whose members are appended one at a time.
///
/// Members keep their insertion order and member names are unique within one
/// entity.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Entity {
    members: Vec<(Symbol, Value)>,
}

impl Entity {
    /// Returns the member called `name`, if present.
    pub fn member_mut(&mut self, name: Symbol) -> Option<&mut Value> {
        self.members
            .iter_mut()
            .find(|(member, _)| *member == name)
            .map(|(_, value)| value)
    }

    /// Returns the member called `name`, if present.
    #[must_use]
    pub fn member(&self, name: Symbol) -> Option<&Value> {
        self.members
            .iter()
            .find(|(member, _)| *member == name)
            .map(|(_, value)| value)
    }

    /// Appends a new member at the end of the member list.
    ///
    /// # Returns
    /// `false`, leaving the entity untouched, if a member with this name
    /// already exists.
    pub fn append_member(&mut self, name: Symbol, value: Value) -> bool {
        if self.member(name).is_some() {
            return false;
        }
        self.members.push((name, value));
        true
    }

    /// Iterates over the members in the order they were appended.
    pub fn members(&self) -> impl Iterator<Item = (Symbol, Value)> + '_ {
        self.members.iter().copied()
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no member has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Owner of every live entity.
///
/// Entities are created by the `new` native and destroyed only by `del`.
/// There is no collection: an entity nobody references stays allocated until
/// the heap is dropped. Handles are generational, so a handle used after `del`
/// resolves to nothing instead of to a recycled slot.
#[derive(Debug, Default)]
pub struct EntityHeap {
    entities: SlotMap<EntityRef, Entity>,
}

impl EntityHeap {
    /// Allocates an empty entity.
    pub fn allocate(&mut self) -> EntityRef {
        self.entities.insert(Entity::default())
    }

    /// Destroys an entity together with its members.
    ///
    /// # Returns
    /// The destroyed entity, or `None` if the handle was already dead.
    pub fn delete(&mut self, entity: EntityRef) -> Option<Entity> {
        self.entities.remove(entity)
    }

    /// Returns the entity behind a live handle.
    #[must_use]
    pub fn get(&self, entity: EntityRef) -> Option<&Entity> {
        self.entities.get(entity)
    }

    /// Returns the entity behind a live handle.
    pub fn get_mut(&mut self, entity: EntityRef) -> Option<&mut Entity> {
        self.entities.get_mut(entity)
    }

    /// Number of entities that have been allocated and not yet deleted.
    #[must_use]
    pub fn live(&self) -> usize {
        self.entities.len()
    }
}
