//! The lexer's state-transition table.
//!
//! The table is plain data behind a `match`: [`transition`] maps a
//! `(state, character class)` pair to the next state and the action the
//! driver performs. Pairs with no entry fall back to [`closing`], which
//! decides what token the characters accumulated so far form.

use crate::token::TokenKind;

/// Classification of a single input character.
///
/// This, not the raw character, keys the transition table, so one entry
/// covers every digit or every letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Digit,
    /// Letters and `_`.
    Letter,
    /// Any whitespace other than `\n`.
    Whitespace,
    Newline,
    /// Every other character stands for itself.
    Char(char),
}

pub fn classify(ch: char) -> CharClass {
    if ch.is_ascii_digit() {
        CharClass::Digit
    } else if ch.is_alphabetic() || ch == '_' {
        CharClass::Letter
    } else if ch == '\n' {
        CharClass::Newline
    } else if ch.is_whitespace() {
        CharClass::Whitespace
    } else {
        CharClass::Char(ch)
    }
}

/// States of the lexer automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexerState {
    Start,

    Integer,
    /// Saw `digit+ '.'`, needs a digit to become a float.
    FloatDot,
    FloatDigits,

    Identifier,

    String,
    StringEscape,
    Char,
    CharEscape,

    /// Saw `/`: divide or the start of a comment.
    Slash,
    SingleComment,
    MultiComment,
    /// Saw `*` inside a block comment.
    MultiCommentEnd,

    // One-character lookahead for operators that may be doubled.
    Equal,
    Less,
    Greater,
    Not,
    And,
    Or,
    Plus,
    Minus,

    Preprocessor,
}

impl LexerState {
    pub const ALL: [LexerState; 22] = [
        LexerState::Start,
        LexerState::Integer,
        LexerState::FloatDot,
        LexerState::FloatDigits,
        LexerState::Identifier,
        LexerState::String,
        LexerState::StringEscape,
        LexerState::Char,
        LexerState::CharEscape,
        LexerState::Slash,
        LexerState::SingleComment,
        LexerState::MultiComment,
        LexerState::MultiCommentEnd,
        LexerState::Equal,
        LexerState::Less,
        LexerState::Greater,
        LexerState::Not,
        LexerState::And,
        LexerState::Or,
        LexerState::Plus,
        LexerState::Minus,
        LexerState::Preprocessor,
    ];
}

/// What the driver does with the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Append the character to the lexeme and advance.
    Consume,
    /// Advance without starting a lexeme.
    Skip,
    /// Consume the character and emit a token of this kind.
    Emit(TokenKind),
    /// Emit a token of this kind and leave the character for the next call.
    EmitBefore(TokenKind),
}

/// One table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: LexerState,
    pub action: Action,
}

const fn go(next: LexerState, action: Action) -> Option<Transition> {
    Some(Transition { next, action })
}

const fn consume(next: LexerState) -> Option<Transition> {
    go(next, Action::Consume)
}

const fn emit(kind: TokenKind) -> Option<Transition> {
    go(LexerState::Start, Action::Emit(kind))
}

/// Look up the table entry for `(state, class)`.
pub fn transition(state: LexerState, class: CharClass) -> Option<Transition> {
    use CharClass::{Char, Digit, Letter, Newline, Whitespace};
    use LexerState as S;

    match (state, class) {
        (S::Start, Digit) => consume(S::Integer),
        (S::Start, Letter) => consume(S::Identifier),
        (S::Start, Char('"')) => consume(S::String),
        (S::Start, Char('\'')) => consume(S::Char),
        (S::Start, Char('/')) => consume(S::Slash),
        (S::Start, Char('=')) => consume(S::Equal),
        (S::Start, Char('<')) => consume(S::Less),
        (S::Start, Char('>')) => consume(S::Greater),
        (S::Start, Char('!')) => consume(S::Not),
        (S::Start, Char('&')) => consume(S::And),
        (S::Start, Char('|')) => consume(S::Or),
        (S::Start, Char('+')) => consume(S::Plus),
        (S::Start, Char('-')) => consume(S::Minus),
        (S::Start, Char('#')) => consume(S::Preprocessor),
        (S::Start, Whitespace) => go(S::Start, Action::Skip),
        (S::Start, Newline) => emit(TokenKind::Newline),
        (S::Start, Char(';')) => emit(TokenKind::Semicolon),
        (S::Start, Char(',')) => emit(TokenKind::Comma),
        (S::Start, Char('(')) => emit(TokenKind::LeftParen),
        (S::Start, Char(')')) => emit(TokenKind::RightParen),
        (S::Start, Char('{')) => emit(TokenKind::LeftBrace),
        (S::Start, Char('}')) => emit(TokenKind::RightBrace),
        (S::Start, Char('[')) => emit(TokenKind::LeftBracket),
        (S::Start, Char(']')) => emit(TokenKind::RightBracket),
        (S::Start, Char('.')) => emit(TokenKind::Dot),
        (S::Start, Char('*')) => emit(TokenKind::Multiply),
        (S::Start, Char('%')) => emit(TokenKind::Modulo),
        (S::Start, Char('^')) => emit(TokenKind::BitwiseXor),
        (S::Start, Char('~')) => emit(TokenKind::BitwiseNot),

        (S::Integer, Digit) => consume(S::Integer),
        (S::Integer, Char('.')) => consume(S::FloatDot),
        (S::FloatDot, Digit) => consume(S::FloatDigits),
        (S::FloatDigits, Digit) => consume(S::FloatDigits),

        (S::Identifier, Letter | Digit) => consume(S::Identifier),

        (S::String, Char('"')) => emit(TokenKind::String),
        (S::String, Char('\\')) => consume(S::StringEscape),
        (S::String, _) => consume(S::String),
        (S::StringEscape, _) => consume(S::String),

        (S::Char, Char('\'')) => emit(TokenKind::Character),
        (S::Char, Char('\\')) => consume(S::CharEscape),
        (S::Char, _) => consume(S::Char),
        (S::CharEscape, _) => consume(S::Char),

        (S::Slash, Char('/')) => consume(S::SingleComment),
        (S::Slash, Char('*')) => consume(S::MultiComment),
        (S::SingleComment, Newline) => go(S::Start, Action::EmitBefore(TokenKind::SingleComment)),
        (S::SingleComment, _) => consume(S::SingleComment),
        (S::MultiComment, Char('*')) => consume(S::MultiCommentEnd),
        (S::MultiComment, _) => consume(S::MultiComment),
        (S::MultiCommentEnd, Char('/')) => emit(TokenKind::MultiComment),
        (S::MultiCommentEnd, Char('*')) => consume(S::MultiCommentEnd),
        (S::MultiCommentEnd, _) => consume(S::MultiComment),

        (S::Equal, Char('=')) => emit(TokenKind::Equal),
        (S::Less, Char('=')) => emit(TokenKind::LessEqual),
        (S::Less, Char('<')) => emit(TokenKind::LeftShift),
        (S::Greater, Char('=')) => emit(TokenKind::GreaterEqual),
        (S::Greater, Char('>')) => emit(TokenKind::RightShift),
        (S::Not, Char('=')) => emit(TokenKind::NotEqual),
        (S::And, Char('&')) => emit(TokenKind::And),
        (S::Or, Char('|')) => emit(TokenKind::Or),
        (S::Plus, Char('+')) => emit(TokenKind::Increment),
        (S::Minus, Char('-')) => emit(TokenKind::Decrement),
        (S::Minus, Char('>')) => emit(TokenKind::Arrow),

        (S::Preprocessor, Newline) => go(S::Start, Action::EmitBefore(TokenKind::Preprocessor)),
        (S::Preprocessor, Letter) => consume(S::Preprocessor),
        // Directive arguments (`<stdio.h>`, `"x.h"`, numbers) are kept verbatim.
        (S::Preprocessor, _) => consume(S::Preprocessor),

        _ => None,
    }
}

/// Payload of the error token for an unterminated string literal.
pub const UNTERMINATED_STRING: &str = "Unterminated string literal";
/// Payload of the error token for an unterminated character literal.
pub const UNTERMINATED_CHAR: &str = "Unterminated character literal";
/// Payload of the error token for an unterminated block comment.
pub const UNTERMINATED_COMMENT: &str = "Unterminated block comment";
/// Prefix of the error token for a character no token can start with.
pub const UNEXPECTED_CHARACTER: &str = "Unexpected character";

/// How a state ends when the table has no entry for the next character,
/// or when the input runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    /// The token ended one character ago.
    Emit(TokenKind),
    /// No token can start with this character.
    Unexpected,
    /// `digit+ '.'` with no digit after the dot: an integer, with the dot
    /// handed back to be lexed on its own.
    SplitTrailingDot,
    /// The input ended inside a literal or comment.
    Unterminated(&'static str),
}

pub fn closing(state: LexerState) -> Closing {
    use LexerState as S;

    match state {
        S::Start => Closing::Unexpected,
        S::Integer => Closing::Emit(TokenKind::Integer),
        S::FloatDot => Closing::SplitTrailingDot,
        S::FloatDigits => Closing::Emit(TokenKind::Float),
        // Resolved to a keyword at emission time.
        S::Identifier => Closing::Emit(TokenKind::Identifier),
        S::String | S::StringEscape => Closing::Unterminated(UNTERMINATED_STRING),
        S::Char | S::CharEscape => Closing::Unterminated(UNTERMINATED_CHAR),
        S::Slash => Closing::Emit(TokenKind::Divide),
        S::SingleComment => Closing::Emit(TokenKind::SingleComment),
        S::MultiComment | S::MultiCommentEnd => Closing::Unterminated(UNTERMINATED_COMMENT),
        S::Equal => Closing::Emit(TokenKind::Assign),
        S::Less => Closing::Emit(TokenKind::Less),
        S::Greater => Closing::Emit(TokenKind::Greater),
        S::Not => Closing::Emit(TokenKind::Not),
        S::And => Closing::Emit(TokenKind::BitwiseAnd),
        S::Or => Closing::Emit(TokenKind::BitwiseOr),
        S::Plus => Closing::Emit(TokenKind::Plus),
        S::Minus => Closing::Emit(TokenKind::Minus),
        S::Preprocessor => Closing::Emit(TokenKind::Preprocessor),
    }
}
