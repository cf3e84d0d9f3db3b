//! # entity
//!
//! entity is a small typed imperative scripting language with a C-like
//! surface syntax, written in Rust. Programs declare typed globals and
//! functions, and build objects ("entities") whose typed members are appended
//! at run time. Host programs embed the interpreter and register native
//! functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::Error,
    interpreter::{
        evaluator::core::Interpreter,
        function::native,
        value::{core::Value, primitive::PrimitiveType},
    },
};

/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, reading the
/// grammar or evaluating a program. Every error carries the source line it
/// points at and the names involved, and every error is fatal to the run.
///
/// # Responsibilities
/// - Defines `ParseError` for lexical and grammatical failures.
/// - Defines `RuntimeError` for name, type, entity and control-flow failures.
/// - Wraps both in `Error`, the failure type of a whole run.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together lexing, the token stream, the scope chain, the
/// entity heap, the function table and the evaluator to provide a complete
/// runtime for entity programs.
///
/// # Responsibilities
/// - Tokenizes source text once, up front.
/// - Executes the program directly off the token stream, without a syntax
///   tree.
/// - Owns all mutable state in one `Interpreter` value, so several programs
///   can run side by side.
pub mod interpreter;

/// Runs a program and returns the value `main` produced.
///
/// The program is tokenized, its global declarations are executed, its
/// functions are registered and `main` is called with no arguments. Only the
/// `new` and `del` natives are available.
///
/// # Errors
/// Returns the first parse or runtime error of the run.
///
/// # Examples
/// ```
/// use entity::{interpreter::value::core::Value, run};
///
/// let source = "int total = 0;
///               int main() {
///                   int i = 0;
///                   while (i < 5) { total = total + i; i = i + 1; }
///                   return total;
///               }";
/// assert_eq!(run(source).unwrap(), Value::Int(10));
///
/// // 'x' is not defined.
/// assert!(run("int main() { return x; }").is_err());
/// ```
pub fn run(source: &str) -> Result<Value, Error> {
    Interpreter::new(source)?.run()
}

/// Runs a program as the command-line host does and returns its exit value.
///
/// Registers `void print(string s)` next to `new` and `del`, runs the program
/// and requires `main` to return an `int`. With `auto_print` set, that value is
/// printed as a decimal line.
///
/// # Errors
/// Returns the first parse or runtime error of the run.
///
/// # Examples
/// ```
/// use entity::get_result;
///
/// let source = r#"int main() { print("hello "); return 7; }"#;
/// assert_eq!(get_result(source, false).unwrap(), 7);
///
/// // main must be declared int.
/// assert!(get_result("void main() { }", false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<i32, Error> {
    let mut interpreter = Interpreter::new(source)?;
    interpreter.register_native("print",
                                PrimitiveType::Void,
                                &[("s", PrimitiveType::String)],
                                native::print)?;

    let value = interpreter.run()?;
    let result = value.as_int(interpreter.tokens().line())?;

    if auto_print {
        println!("{result}");
    }

    Ok(result)
}
