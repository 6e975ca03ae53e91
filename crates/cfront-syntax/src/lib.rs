//! AST definitions for cfront.
//!
//! Every grammar construct is an [`AstNode`]: a [`NodeLabel`] drawn from a
//! closed set, an optional lexical payload, and an ordered list of owned
//! children.

mod label;
mod node;

pub use label::NodeLabel;
pub use node::{AstNode, Descendants};
