//! Error codes for cfront diagnostics.

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lexer errors (E0001 - E0099)
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedComment,
    UnterminatedChar,

    // Parser errors (E0100 - E0199)
    UnexpectedToken,
    ExpectedExpression,
    UnclosedDelimiter,
    MissingSemicolon,
    ExpectedDeclaration,
    RecursionLimit,
    TooManyErrors,
    IterationLimit,

    // Analyzer errors (E0900 - E0999)
    InternalFailure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::UnexpectedCharacter => "E0001",
            ErrorCode::UnterminatedString => "E0002",
            ErrorCode::UnterminatedComment => "E0003",
            ErrorCode::UnterminatedChar => "E0004",

            // Parser
            ErrorCode::UnexpectedToken => "E0100",
            ErrorCode::ExpectedExpression => "E0101",
            ErrorCode::UnclosedDelimiter => "E0102",
            ErrorCode::MissingSemicolon => "E0103",
            ErrorCode::ExpectedDeclaration => "E0104",
            ErrorCode::RecursionLimit => "E0105",
            ErrorCode::TooManyErrors => "E0106",
            ErrorCode::IterationLimit => "E0107",

            // Analyzer
            ErrorCode::InternalFailure => "E0900",
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::UnexpectedCharacter => "unexpected character in input",
            ErrorCode::UnterminatedString => "string literal is not terminated",
            ErrorCode::UnterminatedComment => "block comment is not terminated",
            ErrorCode::UnterminatedChar => "character literal is not terminated",

            ErrorCode::UnexpectedToken => "unexpected token",
            ErrorCode::ExpectedExpression => "expected an expression",
            ErrorCode::UnclosedDelimiter => "unclosed delimiter",
            ErrorCode::MissingSemicolon => "missing semicolon",
            ErrorCode::ExpectedDeclaration => "expected a declaration",
            ErrorCode::RecursionLimit => "nesting is too deep",
            ErrorCode::TooManyErrors => "too many errors",
            ErrorCode::IterationLimit => "construct repeats too many times",

            ErrorCode::InternalFailure => "internal analyzer failure",
        }
    }

    /// Get a suggested fix for the error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ErrorCode::UnterminatedString => Some("add a closing quote `\"` to terminate the string"),
            ErrorCode::UnterminatedChar => Some("add a closing quote `'` to terminate the character"),
            ErrorCode::UnterminatedComment => Some("add `*/` to close the comment"),
            ErrorCode::MissingSemicolon => Some("add `;` at the end of the statement"),
            ErrorCode::UnclosedDelimiter => Some("add the matching closing delimiter"),
            ErrorCode::ExpectedDeclaration => {
                Some("top-level items start with a type such as `int` or `void`")
            }
            _ => None,
        }
    }
}
