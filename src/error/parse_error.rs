#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or while reading the
/// grammar off the token stream.
pub enum ParseError {
    /// A character that starts no token.
    LexError {
        /// The offending character.
        ch:   char,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An identifier longer than the lexer accepts.
    IdentifierTooLong {
        /// The identifier as written.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal without a closing quote.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer literal that does not fit into `int`.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found a different token than the grammar requires here.
    UnexpectedToken {
        /// What the grammar required.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// No statement starts with the current token.
    ExpectedStatement {
        /// The token encountered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// No expression starts with the current token.
    ExpectedExpression {
        /// The token encountered.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    /// The source line the error points at.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::LexError { line, .. }
            | Self::IdentifierTooLong { line, .. }
            | Self::UnterminatedString { line }
            | Self::LiteralTooLarge { line }
            | Self::UnexpectedToken { line, .. }
            | Self::ExpectedStatement { line, .. }
            | Self::ExpectedExpression { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LexError { ch, line } => {
                write!(f, "Error on line {line}: Unexpected character '{ch}'.")
            },
            Self::IdentifierTooLong { name, line } => {
                write!(f, "Error on line {line}: Identifier '{name}' is too long.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: String literal is never closed.")
            },
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => write!(f,
                                                      "Error on line {line}: Expected {expected}, found {found}."),
            Self::ExpectedStatement { found, line } => {
                write!(f, "Error on line {line}: Expected a statement, found {found}.")
            },
            Self::ExpectedExpression { found, line } => {
                write!(f, "Error on line {line}: Expected an expression, found {found}.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
