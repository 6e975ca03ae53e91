//! Bounds that keep the parser terminating on hostile input.

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Diagnostics recorded before parsing stops.
    pub max_errors: usize,
    /// Nesting depth of guarded grammar rules.
    pub max_depth: usize,
    /// Tokens scanned while looking for a missing closing delimiter.
    pub balanced_skip: usize,
    /// Tokens skipped while resynchronizing inside a block.
    pub statement_skip: usize,
    /// Call/index suffixes applied to one primary expression.
    pub postfix_iterations: usize,
    /// Arguments in one call.
    pub max_arguments: usize,
}

impl ParseLimits {
    pub const DEFAULT: ParseLimits = ParseLimits {
        max_errors: 50,
        max_depth: 100,
        balanced_skip: 200,
        statement_skip: 100,
        postfix_iterations: 50,
        max_arguments: 50,
    };

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
