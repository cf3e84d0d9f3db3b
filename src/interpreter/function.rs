/// Native function implementations.
///
/// Contains the entity lifecycle natives `new` and `del` and the `print`
/// native the command-line host installs.
pub mod native;

/// Function definitions and the function table.
///
/// Defines `Function`, its parameters and its native or source body, and the
/// `FunctionTable` that maps names to definitions.
pub mod core;
