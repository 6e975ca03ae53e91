//! Error recovery vocabulary for the parser.
//!
//! These are the token sets the parser resynchronizes on after a
//! syntax error, so one mistake does not hide the ones after it.

use cfront_lexer::{Token, TokenKind, is_base_type};

/// Keywords that start a statement other than a declaration.
pub const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "return"];

/// Tokens that end a statement-skip.
pub const RECOVERY_TOKENS: &[TokenKind] = &[
    TokenKind::Semicolon,
    TokenKind::LeftBrace,
    TokenKind::RightBrace,
    TokenKind::Eof,
    TokenKind::Preprocessor,
];

/// Tokens a delimiter skip never crosses: none of them can appear
/// between a `(` and its `)` or a `[` and its `]` in this grammar.
pub const DELIMITER_BOUNDARIES: &[TokenKind] = &[
    TokenKind::Semicolon,
    TokenKind::LeftBrace,
    TokenKind::RightBrace,
];

/// Check if a token starts a statement.
pub fn is_statement_keyword(token: &Token) -> bool {
    token.kind == TokenKind::Keyword
        && (CONTROL_KEYWORDS.contains(&token.text.as_str()) || is_base_type(&token.text))
}

/// Check if a token ends a statement-skip.
pub fn is_recovery_token(kind: TokenKind) -> bool {
    RECOVERY_TOKENS.contains(&kind)
}

/// Check if a delimiter skip must stop before this token.
pub fn is_delimiter_boundary(kind: TokenKind) -> bool {
    DELIMITER_BOUNDARIES.contains(&kind)
}

/// Delimiter kinds for balanced skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterKind {
    Paren,   // ( )
    Bracket, // [ ]
}

impl DelimiterKind {
    pub fn opening_token(&self) -> TokenKind {
        match self {
            DelimiterKind::Paren => TokenKind::LeftParen,
            DelimiterKind::Bracket => TokenKind::LeftBracket,
        }
    }

    pub fn closing_token(&self) -> TokenKind {
        match self {
            DelimiterKind::Paren => TokenKind::RightParen,
            DelimiterKind::Bracket => TokenKind::RightBracket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfront_common::{Position, Span};

    fn keyword(text: &str) -> Token {
        Token::new(TokenKind::Keyword, text, Position::START, Span::DUMMY)
    }

    #[test]
    fn test_is_statement_keyword() {
        assert!(is_statement_keyword(&keyword("if")));
        assert!(is_statement_keyword(&keyword("return")));
        assert!(is_statement_keyword(&keyword("unsigned")));
        assert!(!is_statement_keyword(&keyword("else")));
        assert!(!is_statement_keyword(&Token::new(
            TokenKind::Identifier,
            "if",
            Position::START,
            Span::DUMMY
        )));
    }

    #[test]
    fn test_recovery_tokens() {
        assert!(is_recovery_token(TokenKind::Semicolon));
        assert!(is_recovery_token(TokenKind::Preprocessor));
        assert!(!is_recovery_token(TokenKind::Identifier));
    }

    #[test]
    fn test_delimiter_tokens() {
        assert_eq!(DelimiterKind::Paren.opening_token(), TokenKind::LeftParen);
        assert_eq!(DelimiterKind::Bracket.closing_token(), TokenKind::RightBracket);
        assert!(is_delimiter_boundary(TokenKind::LeftBrace));
        assert!(!is_delimiter_boundary(TokenKind::RightParen));
    }
}
