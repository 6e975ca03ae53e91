//! Lexical analysis for cfront.
//! cfront 词法分析模块。
//!
//! The lexer is a deterministic finite automaton: [`table::transition`]
//! holds the `(state, character class) -> (next state, action)` map, and
//! [`Lexer`] walks it one character at a time.
//! 词法分析器是一个确定性有限自动机：状态转移表与驱动循环分离。

mod lexer;
pub mod table;
mod token;

pub use lexer::{Lexer, tokenize_all};
pub use table::{
    Action, CharClass, Closing, LexerState, Transition, UNEXPECTED_CHARACTER, UNTERMINATED_CHAR,
    UNTERMINATED_COMMENT, UNTERMINATED_STRING, classify, closing, transition,
};
pub use token::{BASE_TYPES, KEYWORDS, Token, TokenCategory, TokenKind, is_base_type, is_keyword};
