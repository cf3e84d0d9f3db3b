use std::cmp::Ordering;

use crate::interpreter::value::core::Value;

/// Compares two `int` operands, yielding `int` 1 when `a` orders as
/// `expected` relative to `b` and 0 otherwise.
///
/// `<` asks for [`Ordering::Less`] and `>` for [`Ordering::Greater`].
///
/// # Example
/// ```
/// use std::cmp::Ordering;
///
/// use entity::interpreter::{evaluator::binary::comparison::compare_integers, value::core::Value};
///
/// assert_eq!(compare_integers(1, 2, Ordering::Less), Value::Int(1));
/// assert_eq!(compare_integers(1, 2, Ordering::Greater), Value::Int(0));
/// ```
#[must_use]
pub fn compare_integers(a: i32, b: i32, expected: Ordering) -> Value {
    Value::from(a.cmp(&b) == expected)
}

/// Compares two `float` operands, yielding an `int` like
/// [`compare_integers`]. Any comparison involving NaN is false.
#[must_use]
pub fn compare_floats(a: f32, b: f32, expected: Ordering) -> Value {
    Value::from(a.partial_cmp(&b) == Some(expected))
}
