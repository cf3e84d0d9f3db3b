use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::binary::{
            BinaryOperator,
            comparison::{compare_floats, compare_integers},
        },
        value::core::{Value, ValueResult},
    },
};

/// Evaluates an operator on two `int` operands.
///
/// Arithmetic wraps on overflow, as 32-bit two's complement integers do.
/// Division truncates toward zero and the remainder takes the sign of the
/// dividend, so `(a / b) * b + a % b == a` holds for every `b != 0`.
///
/// # Parameters
/// - `a`: Left operand.
/// - `op`: Any operator; `<` and `>` are handed to [`compare_integers`].
/// - `b`: Right operand.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `Value::Int` with the result, or `RuntimeError::DivisionByZero`.
///
/// # Example
/// ```
/// use entity::interpreter::{
///     evaluator::binary::{BinaryOperator, scalar::integer_arithmetic},
///     value::core::Value,
/// };
///
/// let q = integer_arithmetic(-7, BinaryOperator::Div, 2, 1).unwrap();
/// let r = integer_arithmetic(-7, BinaryOperator::Mod, 2, 1).unwrap();
///
/// assert_eq!(q, Value::Int(-3));
/// assert_eq!(r, Value::Int(-1));
/// ```
pub fn integer_arithmetic(a: i32, op: BinaryOperator, b: i32, line: usize) -> ValueResult<Value> {
    use BinaryOperator::{Add, Div, Greater, Less, Mod, Mul, Sub};

    Ok(Value::Int(match op {
                      Add => a.wrapping_add(b),
                      Sub => a.wrapping_sub(b),
                      Mul => a.wrapping_mul(b),
                      Div | Mod if b == 0 => return Err(RuntimeError::DivisionByZero { line }),
                      Div => a.wrapping_div(b),
                      Mod => a.wrapping_rem(b),
                      Less => return Ok(compare_integers(a, b, Ordering::Less)),
                      Greater => return Ok(compare_integers(a, b, Ordering::Greater)),
                  }))
}

/// Evaluates an operator on two `float` operands.
///
/// `%` is the floating remainder, whose sign follows the dividend. Division
/// by zero follows IEEE 754 and yields an infinity or NaN.
pub fn float_arithmetic(a: f32, op: BinaryOperator, b: f32) -> Value {
    use BinaryOperator::{Add, Div, Greater, Less, Mod, Mul, Sub};

    match op {
        Add => Value::Float(a + b),
        Sub => Value::Float(a - b),
        Mul => Value::Float(a * b),
        Div => Value::Float(a / b),
        Mod => Value::Float(a % b),
        Less => compare_floats(a, b, Ordering::Less),
        Greater => compare_floats(a, b, Ordering::Greater),
    }
}
