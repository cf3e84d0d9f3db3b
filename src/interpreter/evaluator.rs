/// Binary operator evaluation logic.
///
/// Implements the operator matrix: arithmetic and comparison between `int`
/// and `float` operands, with mixed operands promoted to `float`.
pub mod binary;

/// Core evaluation state.
///
/// Contains the `Interpreter` context that owns the token stream,
/// runtime and function table, the control-flow `Signal` and the
/// evaluator's result type.
pub mod core;

/// Expression evaluation.
///
/// Reads comparisons, arithmetic chains, unary minus, literals, references
/// and calls straight off the token stream, computing values as it goes.
pub mod expression;

/// Statement execution.
///
/// Executes declarations, member appends, assignments, call statements,
/// blocks and `return`.
pub mod statement;

/// Conditionals and loops.
///
/// Executes `if`/`else` chains, `while` and `do`/`while`, replaying loop
/// conditions and bodies from checkpoints and skipping untaken branches.
pub mod control_flow;

/// The call protocol.
///
/// Binds arguments one at a time into a fresh callee scope, re-roots that
/// scope at the global scope, runs the body and checks the result type.
pub mod call;

/// Program loading.
///
/// Runs global declarations and registers function definitions.
pub mod program;
