use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::binary::scalar::{float_arithmetic, integer_arithmetic},
        value::core::{Value, ValueResult},
    },
};

/// The binary operators of the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `<`
    Less,
    /// `>`
    Greater,
}

impl BinaryOperator {
    /// Whether the operator compares rather than computes.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Less | Self::Greater)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        Self::Add => "+",
                        Self::Sub => "-",
                        Self::Mul => "*",
                        Self::Div => "/",
                        Self::Mod => "%",
                        Self::Less => "<",
                        Self::Greater => ">",
                    })
    }
}

/// Evaluates a binary operation between two values.
///
/// The result is looked up in a fixed matrix keyed by the operand types:
/// - `int ⊕ int` yields `int`;
/// - `float ⊕ float` yields `float`, with `%` as the floating remainder;
/// - `float ⊕ int` and `int ⊕ float` promote the `int` operand to `float`
///   first.
///
/// Comparisons yield `int` 0 or 1 in every row. There is no other implicit
/// promotion.
///
/// # Parameters
/// - `left`: Left operand.
/// - `op`: The operator.
/// - `right`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The computed value, `RuntimeError::TypeError` for any type pair outside the
/// matrix, or `RuntimeError::DivisionByZero` for an integer division or
/// remainder by zero.
///
/// # Example
/// ```
/// use entity::interpreter::{
///     evaluator::binary::{BinaryOperator, binary_op},
///     value::core::Value,
/// };
///
/// let sum = binary_op(Value::Int(3), BinaryOperator::Add, Value::Float(0.5), 1).unwrap();
/// assert_eq!(sum, Value::Float(3.5));
///
/// let less = binary_op(Value::Int(3), BinaryOperator::Less, Value::Int(4), 1).unwrap();
/// assert_eq!(less, Value::Int(1));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn binary_op(left: Value, op: BinaryOperator, right: Value, line: usize) -> ValueResult<Value> {
    use Value::{Float, Int};

    match (left, right) {
        (Int(a), Int(b)) => integer_arithmetic(a, op, b, line),
        (Float(a), Float(b)) => Ok(float_arithmetic(a, op, b)),
        (Float(a), Int(b)) => Ok(float_arithmetic(a, op, b as f32)),
        (Int(a), Float(b)) => Ok(float_arithmetic(a as f32, op, b)),
        _ => Err(RuntimeError::TypeError { op,
                                           lhs: left.ty(),
                                           rhs: right.ty(),
                                           line }),
    }
}
