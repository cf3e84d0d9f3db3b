/// Entity objects and their heap.
///
/// Defines `Entity`, the object with an ordered, append-only member list, and
/// `EntityHeap`, which owns every entity between `new` and `del`.
pub mod entity;
/// Declarable types.
///
/// Defines `PrimitiveType`, the tag every value carries, together with the
/// keyword spelling of each type.
pub mod primitive;

/// Runtime values.
///
/// Defines the tagged `Value`, the zero value of each type and the strict
/// conversion, condition and entity accessors the evaluator relies on.
pub mod core;
