/// The evaluator module parses and executes programs in a single pass.
///
/// The evaluator reads the token stream with recursive descent and executes
/// every construct the moment it is recognized. No syntax tree is built: loop
/// conditions, loop bodies and function bodies are re-read from checkpoints
/// each time they run, and untaken branches are skipped token by token.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements, declarations and calls.
/// - Propagates `return`, `break` and `continue` as explicit signals.
/// - Reports parse and runtime errors with the line of the offending token.
pub mod evaluator;
/// The function module defines callable functions and their registry.
///
/// Functions are either host callbacks or source bodies recorded as a
/// checkpoint on the token stream.
///
/// # Responsibilities
/// - Defines `Function`, its parameters and its body.
/// - Keeps the global function table, rejecting redefinitions.
/// - Implements the `new`, `del` and `print` natives.
pub mod function;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to a literal, an identifier, a type keyword, a
/// control keyword or a piece of punctuation. This is the first stage of
/// interpretation and runs once, over the whole input.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Interns identifiers and string literals into the symbol table.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The runtime module bundles the mutable program state.
///
/// Holds the scope chain, the entity heap and the symbol table, and resolves
/// variable and member places against them.
pub mod runtime;
/// Variable scopes.
pub mod scope;
/// Interned identifiers and string literals.
pub mod symbol;
/// The token sequence with its cursor, checkpoints and block skipping.
pub mod token_stream;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the thirteen primitive types, the tagged `Value` that
/// holds one of them, and entities: heap objects whose typed members are
/// appended while the program runs.
///
/// # Responsibilities
/// - Defines the `Value` enum, its zero values and its strict conversions.
/// - Defines entities and the heap that owns them.
pub mod value;
