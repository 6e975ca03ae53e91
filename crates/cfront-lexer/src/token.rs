//! Token definitions for cfront.

use std::fmt;

use cfront_common::{Position, Span};

/// The full C keyword set. Identifiers in this set are emitted as
/// [`TokenKind::Keyword`].
pub const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

/// Keywords that may start a declaration.
pub const BASE_TYPES: &[&str] = &[
    "int", "float", "char", "void", "double", "long", "short", "signed", "unsigned",
];

pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

pub fn is_base_type(text: &str) -> bool {
    BASE_TYPES.contains(&text)
}

/// A token with its kind, lexeme and position.
///
/// `line`/`column` point at the first character of the lexeme. For
/// [`TokenKind::Error`] tokens `text` holds the diagnostic message instead
/// of the lexeme; `span` always covers the source characters involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            line: position.line,
            column: position.column,
            span,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns true if this is the keyword `word`.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// Returns true if this is a keyword naming a base type.
    pub fn is_base_type(&self) -> bool {
        self.kind == TokenKind::Keyword && is_base_type(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token({}, '{}', {}:{})",
            self.kind, self.text, self.line, self.column
        )
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Literals
    Integer,
    Float,
    Character,
    String,

    // Identifiers and keywords
    Identifier,
    Keyword,

    // Operators
    Plus,         // +
    Minus,        // -
    Multiply,     // *
    Divide,       // /
    Modulo,       // %
    Assign,       // =
    Equal,        // ==
    NotEqual,     // !=
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=
    And,          // &&
    Or,           // ||
    Not,          // !
    BitwiseAnd,   // &
    BitwiseOr,    // |
    BitwiseXor,   // ^
    BitwiseNot,   // ~
    LeftShift,    // <<
    RightShift,   // >>
    Increment,    // ++
    Decrement,    // --

    // Punctuation
    Semicolon,    // ;
    Comma,        // ,
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Dot,          // .
    Arrow,        // ->

    /// A whole `#...` line, unexpanded.
    Preprocessor,

    // Comments
    SingleComment,
    MultiComment,

    // Special
    Newline,
    Eof,
    Error,
}

/// Coarse grouping of token kinds for syntax highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Number,
    String,
    Comment,
    Preprocessor,
    Operator,
    Punctuation,
    Other,
}

impl TokenKind {
    /// The upper-case name used in reports and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::Character => "CHARACTER",
            TokenKind::String => "STRING",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::BitwiseAnd => "BITWISE_AND",
            TokenKind::BitwiseOr => "BITWISE_OR",
            TokenKind::BitwiseXor => "BITWISE_XOR",
            TokenKind::BitwiseNot => "BITWISE_NOT",
            TokenKind::LeftShift => "LEFT_SHIFT",
            TokenKind::RightShift => "RIGHT_SHIFT",
            TokenKind::Increment => "INCREMENT",
            TokenKind::Decrement => "DECREMENT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::LeftBracket => "LEFT_BRACKET",
            TokenKind::RightBracket => "RIGHT_BRACKET",
            TokenKind::Dot => "DOT",
            TokenKind::Arrow => "ARROW",
            TokenKind::Preprocessor => "PREPROCESSOR",
            TokenKind::SingleComment => "SINGLE_COMMENT",
            TokenKind::MultiComment => "MULTI_COMMENT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
            TokenKind::Error => "ERROR",
        }
    }

    /// Tokens the parser never looks at.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::SingleComment | TokenKind::MultiComment
        )
    }

    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Keyword => TokenCategory::Keyword,
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::Integer | TokenKind::Float => TokenCategory::Number,
            TokenKind::String | TokenKind::Character => TokenCategory::String,
            TokenKind::SingleComment | TokenKind::MultiComment => TokenCategory::Comment,
            TokenKind::Preprocessor => TokenCategory::Preprocessor,
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Multiply
            | TokenKind::Divide
            | TokenKind::Modulo
            | TokenKind::Assign
            | TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Not
            | TokenKind::BitwiseAnd
            | TokenKind::BitwiseOr
            | TokenKind::BitwiseXor
            | TokenKind::BitwiseNot
            | TokenKind::LeftShift
            | TokenKind::RightShift
            | TokenKind::Increment
            | TokenKind::Decrement => TokenCategory::Operator,
            TokenKind::Semicolon
            | TokenKind::Comma
            | TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::LeftBracket
            | TokenKind::RightBracket
            | TokenKind::Dot
            | TokenKind::Arrow => TokenCategory::Punctuation,
            TokenKind::Newline | TokenKind::Eof | TokenKind::Error => TokenCategory::Other,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
