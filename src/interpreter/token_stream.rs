use crate::{
    error::ParseError,
    interpreter::{lexer::Token, symbol::Symbol, value::primitive::PrimitiveType},
};

/// Result type used while reading tokens.
pub type ParseResult<T> = Result<T, ParseError>;

/// A saved position in a [`TokenStream`].
///
/// Checkpoints are the only lookahead and replay mechanism: the evaluator
/// saves one before a construct it may need to re-read and seeks back to it
/// later, forwards or backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// The fully lexed program, with a movable cursor.
///
/// The sequence always ends with [`Token::Eof`] and the cursor never moves
/// past it, so there is always a current token. Each token keeps the line it
/// was lexed on, so diagnostics during replay report the token's own line.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens:   Vec<(Token, usize)>,
    position: usize,
}

impl TokenStream {
    /// Wraps a lexed token sequence, appending `Eof` if it is missing.
    #[must_use]
    pub fn new(mut tokens: Vec<(Token, usize)>) -> Self {
        if !matches!(tokens.last(), Some((Token::Eof, _))) {
            let line = tokens.last().map_or(1, |(_, line)| *line);
            tokens.push((Token::Eof, line));
        }
        Self { tokens,
               position: 0 }
    }

    /// The token under the cursor.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.tokens[self.position].0
    }

    /// The line of the token under the cursor.
    #[must_use]
    pub fn line(&self) -> usize {
        self.tokens[self.position].1
    }

    /// Whether the token under the cursor is `token`.
    #[must_use]
    pub fn at(&self, token: &Token) -> bool {
        self.current() == token
    }

    /// Whether the cursor has reached the end of input.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.at(&Token::Eof)
    }

    /// Moves the cursor one token forward. Does nothing at `Eof`.
    pub fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Saves the cursor position.
    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    /// Moves the cursor to a saved position.
    ///
    /// Checkpoints from another stream are clamped to this stream's `Eof`.
    pub fn seek(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0.min(self.tokens.len() - 1);
    }

    /// Number of tokens, the closing `Eof` included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always `false`: a stream holds at least `Eof`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Builds the error for an unexpected current token.
    #[must_use]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken { expected: expected.to_string(),
                                      found:    self.current().to_string(),
                                      line:     self.line(), }
    }

    /// Consumes the current token if it is `expected`.
    ///
    /// # Errors
    /// `ParseError::UnexpectedToken` naming both tokens if it is not.
    ///
    /// # Example
    /// ```
    /// use entity::interpreter::{lexer::{Token, tokenize}, symbol::SymbolTable};
    ///
    /// let mut symbols = SymbolTable::new();
    /// let mut stream = tokenize("( )", &mut symbols).unwrap();
    ///
    /// assert!(stream.expect(&Token::LParen).is_ok());
    /// assert!(stream.expect(&Token::LParen).is_err());
    /// ```
    pub fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        if self.at(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    /// Consumes an identifier and returns its symbol.
    pub fn expect_identifier(&mut self) -> ParseResult<Symbol> {
        match self.current() {
            Token::Identifier(symbol) => {
                let symbol = *symbol;
                self.advance();
                Ok(symbol)
            },
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Consumes a type keyword and returns the type it names.
    pub fn expect_type(&mut self) -> ParseResult<PrimitiveType> {
        match self.current() {
            Token::Type(ty) => {
                let ty = *ty;
                self.advance();
                Ok(ty)
            },
            _ => Err(self.unexpected("type")),
        }
    }

    /// Skips a brace-delimited block without executing it.
    ///
    /// The cursor must be at `{`; afterwards it sits on the token following
    /// the matching `}`. Only brace tokens are counted, which is exact since
    /// string literals and identifiers are opaque tokens.
    ///
    /// # Example
    /// ```
    /// use entity::interpreter::{lexer::{Token, tokenize}, symbol::SymbolTable};
    ///
    /// let mut symbols = SymbolTable::new();
    /// let mut stream = tokenize("{ { } { { } } } ;", &mut symbols).unwrap();
    ///
    /// stream.skip_block().unwrap();
    /// assert_eq!(stream.current(), &Token::Semicolon);
    /// ```
    pub fn skip_block(&mut self) -> ParseResult<()> {
        self.skip_delimited(&Token::LBrace, &Token::RBrace)
    }

    /// Skips a parenthesized group such as an unevaluated condition.
    pub fn skip_parenthesized(&mut self) -> ParseResult<()> {
        self.skip_delimited(&Token::LParen, &Token::RParen)
    }

    fn skip_delimited(&mut self, open: &Token, close: &Token) -> ParseResult<()> {
        self.expect(open)?;

        let mut depth = 0usize;
        loop {
            let token = self.current();
            if token == close {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if token == open {
                depth += 1;
            } else if *token == Token::Eof {
                return Err(self.unexpected(&close.to_string()));
            }
            self.advance();
        }

        self.expect(close)
    }
}
