/// Operator dispatch.
///
/// Defines `BinaryOperator` and `binary_op`, which selects the row of the
/// operator matrix from the operand types.
pub mod core;
/// Relational operators.
///
/// Implements `<` and `>` for integers and floats, yielding `int` truth
/// values.
pub mod comparison;
/// Arithmetic operators.
///
/// Implements `+ - * / %` for integers and floats.
pub mod scalar;

pub use self::core::{BinaryOperator, binary_op};
