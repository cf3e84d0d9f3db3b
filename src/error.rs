/// Parsing errors.
///
/// Defines all error types that can occur during lexing and while reading the
/// grammar: unrecognized characters, malformed literals and tokens the grammar
/// does not allow at the current position.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: name
/// resolution failures, type mismatches, entity misuse and stray control flow.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of a program run.
///
/// Parsing and evaluation are a single step, so one run can fail with either
/// kind. Every error is fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source could not be lexed or does not follow the grammar.
    Parse(ParseError),
    /// The program was well-formed up to the point where evaluation failed.
    Runtime(RuntimeError),
}

impl Error {
    /// The source line the error points at, if it has one.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Parse(e) => Some(e.line()),
            Self::Runtime(e) => e.line(),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => e.fmt(f),
            Self::Runtime(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
