//! The closed set of AST node labels.

use std::fmt;
use std::str::FromStr;

/// Names the grammar construct an [`AstNode`](crate::AstNode) stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeLabel {
    /// Root of every parse. / 语法树根节点
    Program,
    /// `#...` line, kept verbatim in the value.
    Preprocessor,

    // Declarations
    Function,
    ReturnType,
    Parameters,
    Parameter,
    Type,
    VariableDeclaration,
    ArraySize,
    Initializer,

    // Statements
    Block,
    IfStatement,
    Condition,
    ThenStatement,
    ElseStatement,
    WhileStatement,
    Body,
    ForStatement,
    Initialization,
    Increment,
    ReturnStatement,
    ExpressionStatement,

    // Expressions
    Assignment,
    BinaryOp,
    UnaryOp,
    FunctionCall,
    Arguments,
    ArrayAccess,

    // Leaves
    Identifier,
    Integer,
    Float,
    Character,
    String,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; 33] = [
        NodeLabel::Program,
        NodeLabel::Preprocessor,
        NodeLabel::Function,
        NodeLabel::ReturnType,
        NodeLabel::Parameters,
        NodeLabel::Parameter,
        NodeLabel::Type,
        NodeLabel::VariableDeclaration,
        NodeLabel::ArraySize,
        NodeLabel::Initializer,
        NodeLabel::Block,
        NodeLabel::IfStatement,
        NodeLabel::Condition,
        NodeLabel::ThenStatement,
        NodeLabel::ElseStatement,
        NodeLabel::WhileStatement,
        NodeLabel::Body,
        NodeLabel::ForStatement,
        NodeLabel::Initialization,
        NodeLabel::Increment,
        NodeLabel::ReturnStatement,
        NodeLabel::ExpressionStatement,
        NodeLabel::Assignment,
        NodeLabel::BinaryOp,
        NodeLabel::UnaryOp,
        NodeLabel::FunctionCall,
        NodeLabel::Arguments,
        NodeLabel::ArrayAccess,
        NodeLabel::Identifier,
        NodeLabel::Integer,
        NodeLabel::Float,
        NodeLabel::Character,
        NodeLabel::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeLabel::Program => "Program",
            NodeLabel::Preprocessor => "Preprocessor",
            NodeLabel::Function => "Function",
            NodeLabel::ReturnType => "ReturnType",
            NodeLabel::Parameters => "Parameters",
            NodeLabel::Parameter => "Parameter",
            NodeLabel::Type => "Type",
            NodeLabel::VariableDeclaration => "VariableDeclaration",
            NodeLabel::ArraySize => "ArraySize",
            NodeLabel::Initializer => "Initializer",
            NodeLabel::Block => "Block",
            NodeLabel::IfStatement => "IfStatement",
            NodeLabel::Condition => "Condition",
            NodeLabel::ThenStatement => "ThenStatement",
            NodeLabel::ElseStatement => "ElseStatement",
            NodeLabel::WhileStatement => "WhileStatement",
            NodeLabel::Body => "Body",
            NodeLabel::ForStatement => "ForStatement",
            NodeLabel::Initialization => "Initialization",
            NodeLabel::Increment => "Increment",
            NodeLabel::ReturnStatement => "ReturnStatement",
            NodeLabel::ExpressionStatement => "ExpressionStatement",
            NodeLabel::Assignment => "Assignment",
            NodeLabel::BinaryOp => "BinaryOp",
            NodeLabel::UnaryOp => "UnaryOp",
            NodeLabel::FunctionCall => "FunctionCall",
            NodeLabel::Arguments => "Arguments",
            NodeLabel::ArrayAccess => "ArrayAccess",
            NodeLabel::Identifier => "Identifier",
            NodeLabel::Integer => "Integer",
            NodeLabel::Float => "Float",
            NodeLabel::Character => "Character",
            NodeLabel::String => "String",
        }
    }

    /// Returns true for the statement forms a block may contain.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeLabel::Block
                | NodeLabel::IfStatement
                | NodeLabel::WhileStatement
                | NodeLabel::ForStatement
                | NodeLabel::ReturnStatement
                | NodeLabel::ExpressionStatement
                | NodeLabel::VariableDeclaration
                | NodeLabel::Function
                | NodeLabel::Preprocessor
        )
    }

    /// Returns true for nodes produced by the expression grammar.
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeLabel::Assignment
                | NodeLabel::BinaryOp
                | NodeLabel::UnaryOp
                | NodeLabel::FunctionCall
                | NodeLabel::ArrayAccess
                | NodeLabel::Identifier
                | NodeLabel::Integer
                | NodeLabel::Float
                | NodeLabel::Character
                | NodeLabel::String
        )
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| format!("unknown node label `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_labels_are_distinct() {
        let names: HashSet<_> = NodeLabel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(names.len(), NodeLabel::ALL.len());
    }

    #[test]
    fn test_every_label_parses_back() {
        for label in NodeLabel::ALL {
            assert_eq!(label.as_str().parse::<NodeLabel>(), Ok(label));
        }
        assert!("Struct".parse::<NodeLabel>().is_err());
    }

    #[test]
    fn test_every_label_is_listed() {
        // Adding a variant without listing it breaks this match.
        for label in NodeLabel::ALL {
            let listed = match label {
                NodeLabel::Program
                | NodeLabel::Preprocessor
                | NodeLabel::Function
                | NodeLabel::ReturnType
                | NodeLabel::Parameters
                | NodeLabel::Parameter
                | NodeLabel::Type
                | NodeLabel::VariableDeclaration
                | NodeLabel::ArraySize
                | NodeLabel::Initializer
                | NodeLabel::Block
                | NodeLabel::IfStatement
                | NodeLabel::Condition
                | NodeLabel::ThenStatement
                | NodeLabel::ElseStatement
                | NodeLabel::WhileStatement
                | NodeLabel::Body
                | NodeLabel::ForStatement
                | NodeLabel::Initialization
                | NodeLabel::Increment
                | NodeLabel::ReturnStatement
                | NodeLabel::ExpressionStatement
                | NodeLabel::Assignment
                | NodeLabel::BinaryOp
                | NodeLabel::UnaryOp
                | NodeLabel::FunctionCall
                | NodeLabel::Arguments
                | NodeLabel::ArrayAccess
                | NodeLabel::Identifier
                | NodeLabel::Integer
                | NodeLabel::Float
                | NodeLabel::Character
                | NodeLabel::String => true,
            };
            assert!(listed);
        }
    }

    #[test]
    fn test_statement_and_expression_sets_are_disjoint() {
        for label in NodeLabel::ALL {
            assert!(!(label.is_statement() && label.is_expression()), "{label}");
        }
    }
}
