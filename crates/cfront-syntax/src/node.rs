//! The generic labeled tree node.

use std::fmt;

use cfront_common::Position;

use crate::NodeLabel;

/// A node of the syntax tree.
///
/// A node owns its children exclusively. It is built bottom-up by the
/// parsing function that produces it and not touched afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub label: NodeLabel,
    /// Operator text, literal text or identifier name, when the construct has one.
    pub value: Option<String>,
    pub children: Vec<AstNode>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl AstNode {
    pub fn new(label: NodeLabel) -> Self {
        Self {
            label,
            value: None,
            children: Vec::new(),
            line: None,
            column: None,
        }
    }

    pub fn with_value(label: NodeLabel, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(label)
        }
    }

    /// Record where the construct starts.
    pub fn at(mut self, position: Position) -> Self {
        self.line = Some(position.line);
        self.column = Some(position.column);
        self
    }

    pub fn position(&self) -> Option<Position> {
        match (self.line, self.column) {
            (Some(line), Some(column)) => Some(Position::new(line, column)),
            _ => None,
        }
    }

    pub fn add_child(&mut self, child: AstNode) {
        self.children.push(child);
    }

    /// Builder form of [`AstNode::add_child`].
    pub fn with_child(mut self, child: AstNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder form that ignores a missing child.
    pub fn with_optional_child(mut self, child: Option<AstNode>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The first direct child with the given label.
    pub fn find_child(&self, label: NodeLabel) -> Option<&AstNode> {
        self.children.iter().find(|child| child.label == label)
    }

    pub fn children_with(&self, label: NodeLabel) -> impl Iterator<Item = &AstNode> {
        self.children.iter().filter(move |child| child.label == label)
    }

    /// Pre-order traversal of this node and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        self.descendants().count()
    }

    /// Indented rendering, two spaces per level, one node per line.
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize) {
        for _ in 0..indent {
            out.push_str("  ");
        }
        out.push_str(&self.to_string());
        out.push('\n');
        for child in &self.children {
            child.write_tree(out, indent + 1);
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({})", self.label, value),
            None => write!(f, "{}", self.label),
        }
    }
}

/// Iterator returned by [`AstNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<&'a AstNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
