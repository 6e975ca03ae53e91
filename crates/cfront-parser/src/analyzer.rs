//! One-call analysis: tokens, tree and diagnostics for a source text.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};

use cfront_common::{Position, Span};
use cfront_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode};
use cfront_lexer::{Token, TokenCategory, TokenKind, tokenize_all};
use cfront_syntax::{AstNode, NodeLabel};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::{ParseLimits, Parser};

/// Failures that escape lexing or parsing.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis error: {0}")]
    Internal(String),
}

impl AnalysisError {
    fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown failure".to_string());
        AnalysisError::Internal(message)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(
            DiagnosticKind::Analyzer,
            Position::START,
            Span::DUMMY,
            self.to_string(),
        )
        .with_code(ErrorCode::InternalFailure)
    }
}

/// The result of [`analyze`].
///
/// `ok` is false only when lexing or parsing failed internally; syntax
/// errors alone leave it true.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub ast: AstNode,
    pub errors: Vec<Diagnostic>,
    pub ok: bool,
}

/// A token prepared for colour-coded display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub kind: TokenKind,
    pub category: TokenCategory,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

/// Lex and parse `source` with the default limits.
pub fn analyze(source: &str) -> Analysis {
    analyze_with(source, ParseLimits::default())
}

/// Lex and parse `source`. Never panics.
#[instrument(skip_all, fields(bytes = source.len()))]
pub fn analyze_with(source: &str, limits: ParseLimits) -> Analysis {
    let tokens = match panic::catch_unwind(|| tokenize_all(source)) {
        Ok(tokens) => tokens,
        Err(payload) => return failed(Vec::new(), AnalysisError::from_panic(payload)),
    };

    let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut parser = Parser::with_limits(tokens.clone(), limits);
        let ast = parser.parse_program();
        (ast, parser.into_diagnostics())
    }));

    match parsed {
        Ok((ast, errors)) => {
            info!(
                tokens = tokens.len(),
                nodes = ast.size(),
                errors = errors.len(),
                "analysis finished"
            );
            Analysis {
                tokens,
                ast,
                errors,
                ok: true,
            }
        }
        Err(payload) => failed(tokens, AnalysisError::from_panic(payload)),
    }
}

fn failed(tokens: Vec<Token>, err: AnalysisError) -> Analysis {
    error!(%err, "analysis failed");
    Analysis {
        tokens,
        ast: AstNode::new(NodeLabel::Program),
        errors: vec![err.to_diagnostic()],
        ok: false,
    }
}

impl Analysis {
    pub fn is_valid_syntax(&self) -> bool {
        self.ok && self.errors.is_empty()
    }

    /// True when the input held nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.tokens
            .iter()
            .all(|token| matches!(token.kind, TokenKind::Newline | TokenKind::Eof))
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Token count, per-kind distribution (most frequent first), then
    /// every token as `KIND: text`.
    pub fn token_report(&self) -> String {
        let mut counts: HashMap<TokenKind, usize> = HashMap::new();
        for token in &self.tokens {
            *counts.entry(token.kind).or_default() += 1;
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name().cmp(b.0.name())));

        let mut out = String::new();
        let _ = writeln!(out, "Total tokens: {}", self.tokens.len());
        out.push_str("\nToken distribution:\n");
        for (kind, count) in counts {
            let _ = writeln!(out, "  {kind}: {count}");
        }
        out.push_str("\n---TOKENS---:\n");
        for token in &self.tokens {
            let _ = writeln!(out, "{}: {}", token.kind, token.text);
        }
        out
    }

    /// The indented tree followed by the syntax error listing.
    pub fn parse_report(&self) -> String {
        let mut out = String::from("Parse tree structure:\n");
        out.push_str(&self.ast.to_tree_string());

        if self.errors.is_empty() {
            out.push_str("\nNo syntax errors found.\n");
        } else {
            let _ = writeln!(out, "\nSyntax errors ({}):", self.errors.len());
            for error in &self.errors {
                let _ = writeln!(out, "  - {error}");
            }
        }
        out
    }

    pub fn highlights(&self) -> Vec<Highlight> {
        self.tokens
            .iter()
            .filter(|token| token.kind != TokenKind::Eof)
            .map(|token| Highlight {
                kind: token.kind,
                category: token.kind.category(),
                text: token.text.clone(),
                line: token.line,
                column: token.column,
            })
            .collect()
    }
}
