//! The cfront lexer driver.
//! cfront 词法分析器驱动。

use cfront_common::{Position, Span};
use tracing::{debug, trace};

use crate::table::{
    Action, Closing, LexerState, Transition, UNEXPECTED_CHARACTER, classify, closing, transition,
};
use crate::token::{Token, TokenKind, is_keyword};

/// The cfront lexer.
/// cfront 词法分析器。
///
/// Walks the transition table one character at a time and returns one
/// token per [`Lexer::next_token`] call. Once it has returned `Eof` it
/// keeps returning `Eof`.
/// 每次调用返回一个 token；返回 `Eof` 之后始终返回 `Eof`。
pub struct Lexer<'src> {
    source: &'src str,
    /// Byte offset of the next unread character
    /// 下一个未读字符的字节偏移
    pos: usize,
    line: u32,
    column: u32,
    /// Current automaton state
    /// 当前自动机状态
    state: LexerState,
    /// Byte offset where the current lexeme starts
    /// 当前词素的起始字节偏移
    start: usize,
    start_position: Position,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code.
    /// 为给定的源代码创建新的词法分析器。
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            state: LexerState::Start,
            start: 0,
            start_position: Position::START,
            finished: false,
        }
    }

    /// Tokenize the entire source. The result ends with exactly one `Eof`.
    /// 对整个源代码进行词法分析，结果以唯一的 `Eof` 结尾。
    pub fn tokenize_all(self) -> Vec<Token> {
        let tokens: Vec<Token> = self.collect();
        debug!(count = tokens.len(), "tokenized source");
        tokens
    }

    /// Produce the next token.
    /// 产生下一个 token。
    pub fn next_token(&mut self) -> Token {
        if self.finished {
            return self.eof();
        }

        loop {
            let Some(ch) = self.peek_char() else {
                return self.end_of_input();
            };

            match transition(self.state, classify(ch)) {
                Some(Transition { next, action }) => match action {
                    Action::Consume => {
                        if self.state == LexerState::Start {
                            self.begin();
                        }
                        self.bump();
                        self.state = next;
                    }
                    Action::Skip => self.bump(),
                    Action::Emit(kind) => {
                        if self.state == LexerState::Start {
                            self.begin();
                        }
                        self.bump();
                        return self.emit(kind);
                    }
                    Action::EmitBefore(kind) => return self.emit(kind),
                },
                None => return self.close(ch),
            }
        }
    }

    // ========== Closing rules ==========

    /// No table entry for `ch`: the lexeme ended one character ago.
    /// `ch` stays unread and is looked at again from `Start`.
    fn close(&mut self, ch: char) -> Token {
        match closing(self.state) {
            Closing::Emit(kind) => self.emit(kind),
            Closing::SplitTrailingDot => self.split_trailing_dot(),
            Closing::Unterminated(message) => self.error(message.to_string()),
            Closing::Unexpected => {
                // Consume the character so the next call makes progress.
                self.begin();
                self.bump();
                self.error(format!("{UNEXPECTED_CHARACTER}: {ch}"))
            }
        }
    }

    /// Force out whatever was being accumulated when the input ran out.
    /// 输入结束时强制输出正在累积的 token。
    fn end_of_input(&mut self) -> Token {
        if self.state == LexerState::Start {
            self.finished = true;
            return self.eof();
        }

        match closing(self.state) {
            Closing::Emit(kind) => self.emit(kind),
            Closing::SplitTrailingDot => self.split_trailing_dot(),
            Closing::Unterminated(message) => {
                debug!(state = ?self.state, "input ended inside a literal or comment");
                self.error(message.to_string())
            }
            Closing::Unexpected => {
                self.finished = true;
                self.eof()
            }
        }
    }

    /// `digit+ '.'` followed by a non-digit lexes as `Integer` then `Dot`.
    fn split_trailing_dot(&mut self) -> Token {
        // The dot is the last byte of the lexeme and never a newline.
        self.pos -= 1;
        self.column -= 1;
        self.emit(TokenKind::Integer)
    }

    // ========== Character helpers ==========

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn begin(&mut self) {
        self.start = self.pos;
        self.start_position = Position::new(self.line, self.column);
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.pos]
    }

    // ========== Token construction ==========

    fn emit(&mut self, kind: TokenKind) -> Token {
        let text = self.lexeme();
        let kind = if kind == TokenKind::Identifier && is_keyword(text) {
            TokenKind::Keyword
        } else {
            kind
        };

        self.state = LexerState::Start;
        let token = Token::new(
            kind,
            text,
            self.start_position,
            Span::from_usize(self.start, self.pos),
        );
        trace!(%token, "emit");
        token
    }

    fn error(&mut self, message: String) -> Token {
        self.state = LexerState::Start;
        debug!(line = self.start_position.line, column = self.start_position.column, %message, "lexical error");
        Token::new(
            TokenKind::Error,
            message,
            self.start_position,
            Span::from_usize(self.start, self.pos),
        )
    }

    fn eof(&self) -> Token {
        Token::new(
            TokenKind::Eof,
            "",
            Position::new(self.line, self.column),
            Span::from_usize(self.pos, self.pos),
        )
    }
}

/// Yields every token up to and including the single `Eof`.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

/// Tokenize `source` in one go.
/// 一次性对 `source` 进行词法分析。
pub fn tokenize_all(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize_all()
}
