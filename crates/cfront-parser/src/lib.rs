//! Parser for cfront.
//!
//! This crate provides a recursive descent parser that converts
//! tokens into an [`AstNode`] tree, plus [`analyze`], which runs the
//! lexer and parser together.
//!
//! ## Error Recovery
//!
//! The parser implements error recovery to continue parsing after
//! encountering errors, allowing multiple errors to be reported
//! in a single parse pass. Every skip loop and every recursive rule is
//! bounded by [`ParseLimits`].

mod analyzer;
mod limits;
mod parser;
mod recovery;

pub use analyzer::{Analysis, AnalysisError, Highlight, analyze, analyze_with};
pub use limits::ParseLimits;
pub use parser::Parser;
pub use recovery::{
    CONTROL_KEYWORDS, DELIMITER_BOUNDARIES, DelimiterKind, RECOVERY_TOKENS, is_delimiter_boundary,
    is_recovery_token, is_statement_keyword,
};

use cfront_diagnostic::Diagnostic;
use cfront_lexer::{Token, tokenize_all};
use cfront_syntax::AstNode;

/// Parse a token sequence into a `Program` tree and its diagnostics.
pub fn parse_program(tokens: Vec<Token>) -> (AstNode, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    (program, parser.into_diagnostics())
}

/// Parse source code into an AST.
pub fn parse(source: &str) -> (AstNode, Vec<Diagnostic>) {
    parse_program(tokenize_all(source))
}
