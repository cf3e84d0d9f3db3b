use std::fmt;

use logos::{Lexer, Logos};

use crate::{
    error::ParseError,
    interpreter::{
        symbol::{Symbol, SymbolTable},
        token_stream::TokenStream,
        value::primitive::PrimitiveType,
    },
};

/// Longest identifier the lexer accepts.
pub const MAX_NAME_LEN: usize = 64;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Identifiers and string bodies are interned while lexing, so every later
/// name comparison is a symbol comparison.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexFailure)]
pub enum Token {
    /// Floating literal tokens, such as `2.5`.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f32),
    /// Integer literal tokens, such as `42`, and character literals such as
    /// `'a'`, which denote their character code.
    #[regex(r"[0-9]+", parse_integer)]
    #[regex(r"'[^'\n]'", parse_char)]
    Integer(i32),
    /// String literal tokens. The body is taken verbatim up to the next `"`.
    #[regex(r#""[^"]*"?"#, intern_string)]
    Str(Symbol),
    /// A declared-type keyword such as `int` or `entity`.
    #[token("void", |_| PrimitiveType::Void)]
    #[token("char", |_| PrimitiveType::Char)]
    #[token("short", |_| PrimitiveType::Short)]
    #[token("int", |_| PrimitiveType::Int)]
    #[token("long", |_| PrimitiveType::Long)]
    #[token("uchar", |_| PrimitiveType::UChar)]
    #[token("ushort", |_| PrimitiveType::UShort)]
    #[token("uint", |_| PrimitiveType::UInt)]
    #[token("ulong", |_| PrimitiveType::ULong)]
    #[token("float", |_| PrimitiveType::Float)]
    #[token("double", |_| PrimitiveType::Double)]
    #[token("string", |_| PrimitiveType::String)]
    #[token("entity", |_| PrimitiveType::Entity)]
    Type(PrimitiveType),
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `for`, reserved without a statement form.
    #[token("for")]
    For,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `break`
    #[token("break")]
    Break,
    /// `return`
    #[token("return")]
    Return,
    /// Identifier tokens; variable, function or member names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", intern_identifier)]
    Identifier(Symbol),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `=`
    #[token("=")]
    Equals,
    /// `!`
    #[token("!")]
    Bang,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `|`
    #[token("|")]
    Pipe,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `.`
    #[token(".")]
    Dot,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// Newlines only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of input. Never produced by the lexer itself; [`tokenize`]
    /// appends it so the stream always has a current token.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Str(_) => f.write_str("string literal"),
            Self::Type(ty) => write!(f, "'{ty}'"),
            Self::Identifier(_) => f.write_str("identifier"),
            Self::Eof => f.write_str("end of input"),
            other => write!(f, "'{}'", other.spelling()),
        }
    }
}

impl Token {
    /// The fixed spelling of keyword and punctuation tokens.
    ///
    /// Tokens with a payload have no fixed spelling and return their kind.
    #[must_use]
    pub const fn spelling(&self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::For => "for",
            Self::Continue => "continue",
            Self::Break => "break",
            Self::Return => "return",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::DoublePipe => "||",
            Self::DoubleAmpersand => "&&",
            Self::Equals => "=",
            Self::Bang => "!",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Pipe => "|",
            Self::Ampersand => "&",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Float(_) => "float literal",
            Self::Integer(_) => "integer literal",
            Self::Str(_) => "string literal",
            Self::Type(_) => "type",
            Self::Identifier(_) => "identifier",
            Self::Comment | Self::NewLine | Self::Ignored => "whitespace",
            Self::Eof => "end of input",
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for diagnostics and holds the symbol table
/// identifiers and strings are interned into while the lexer runs.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:    usize,
    /// The pool identifiers and string literals are interned into.
    pub symbols: SymbolTable,
}

/// Why the lexer rejected a piece of input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexFailure {
    /// A character that starts no token.
    #[default]
    UnexpectedCharacter,
    /// An identifier longer than [`MAX_NAME_LEN`].
    IdentifierTooLong,
    /// A `"` with no closing quote before the end of input.
    UnterminatedString,
    /// An integer literal that does not fit into `int`.
    LiteralTooLarge,
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &Lexer<Token>) -> Result<i32, LexFailure> {
    lex.slice().parse().map_err(|_| LexFailure::LiteralTooLarge)
}

/// Parses a floating literal from the current token slice.
fn parse_float(lex: &Lexer<Token>) -> Option<f32> {
    lex.slice().parse().ok()
}

/// Turns a quoted character such as `'a'` into its character code.
fn parse_char(lex: &Lexer<Token>) -> Result<i32, LexFailure> {
    lex.slice()
       .chars()
       .nth(1)
       .and_then(|c| i32::try_from(u32::from(c)).ok())
       .ok_or(LexFailure::UnexpectedCharacter)
}

/// Interns the body of a string literal, counting any newlines it spans.
fn intern_string(lex: &mut Lexer<Token>) -> Result<Symbol, LexFailure> {
    let slice = lex.slice();
    if slice.len() < 2 || !slice.ends_with('"') {
        return Err(LexFailure::UnterminatedString);
    }

    let body = &slice[1..slice.len() - 1];
    lex.extras.line += body.matches('\n').count();
    Ok(lex.extras.symbols.intern(body))
}

/// Interns an identifier, rejecting names longer than [`MAX_NAME_LEN`].
fn intern_identifier(lex: &mut Lexer<Token>) -> Result<Symbol, LexFailure> {
    let name = lex.slice();
    if name.len() > MAX_NAME_LEN {
        return Err(LexFailure::IdentifierTooLong);
    }
    Ok(lex.extras.symbols.intern(name))
}

/// Lexes the entire source into a [`TokenStream`].
///
/// Every token is paired with the line it starts on, and the stream is closed
/// by a single [`Token::Eof`].
///
/// # Errors
/// Returns the first lexical error: an unrecognized character, an overlong
/// identifier, an unterminated string or an integer literal too large for
/// `int`.
///
/// # Example
/// ```
/// use entity::interpreter::{
///     lexer::{Token, tokenize},
///     symbol::SymbolTable,
///     value::primitive::PrimitiveType,
/// };
///
/// let mut symbols = SymbolTable::new();
/// let stream = tokenize("int x = 1;", &mut symbols).unwrap();
///
/// assert_eq!(stream.len(), 6);
/// assert_eq!(stream.current(), &Token::Type(PrimitiveType::Int));
/// ```
pub fn tokenize(source: &str, symbols: &mut SymbolTable) -> Result<TokenStream, ParseError> {
    let mut lexer = Token::lexer_with_extras(source,
                                             LexerExtras { line:    1,
                                                           symbols: std::mem::take(symbols), });

    let result = collect_tokens(&mut lexer);
    *symbols = std::mem::take(&mut lexer.extras.symbols);

    let mut tokens = result?;
    tokens.push((Token::Eof, lexer.extras.line));

    Ok(TokenStream::new(tokens))
}

/// Drains the lexer into `(Token, line)` pairs, stopping at the first error.
fn collect_tokens(lexer: &mut Lexer<Token>) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(tok) => tokens.push((tok, line)),
            Err(LexFailure::UnexpectedCharacter) => {
                let ch = lexer.slice().chars().next().unwrap_or_default();
                return Err(ParseError::LexError { ch, line });
            },
            Err(LexFailure::IdentifierTooLong) => {
                return Err(ParseError::IdentifierTooLong { name: lexer.slice().to_string(),
                                                           line });
            },
            Err(LexFailure::UnterminatedString) => {
                return Err(ParseError::UnterminatedString { line });
            },
            Err(LexFailure::LiteralTooLarge) => {
                return Err(ParseError::LiteralTooLarge { line });
            },
        }
    }

    Ok(tokens)
}
