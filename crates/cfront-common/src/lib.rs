//! Common utilities and data structures for cfront.
//!
//! This crate provides foundational types used across the front-end:
//! - `Span`: byte range of a lexeme in the source text
//! - `Position`: 1-based line/column of a lexeme's first character

mod span;

pub use span::{BytePos, Position, Span};
