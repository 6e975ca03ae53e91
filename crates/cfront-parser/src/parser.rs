//! The cfront parser.

use cfront_common::{Position, Span};
use cfront_diagnostic::{Diagnostic, DiagnosticKind, ErrorCode, Label};
use cfront_lexer::{
    Token, TokenKind, UNEXPECTED_CHARACTER, UNTERMINATED_CHAR, UNTERMINATED_COMMENT,
    UNTERMINATED_STRING,
};
use cfront_syntax::{AstNode, NodeLabel};
use tracing::{debug, trace, warn};

use crate::ParseLimits;
use crate::recovery::{
    DelimiterKind, is_delimiter_boundary, is_recovery_token, is_statement_keyword,
};

type ParseFn = fn(&mut Parser) -> Option<AstNode>;

/// The cfront parser.
///
/// One grammar rule per method. Syntax errors are recorded as
/// diagnostics and parsing carries on from the next recognizable
/// boundary.
pub struct Parser {
    /// Significant tokens, always ending in `Eof`
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
    /// Current nesting of guarded rules
    depth: usize,
    limits: ParseLimits,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_limits(tokens, ParseLimits::default())
    }

    /// Newlines and comments are dropped up front; a missing trailing
    /// `Eof` is supplied.
    pub fn with_limits(tokens: Vec<Token>, limits: ParseLimits) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|token| !token.kind.is_trivia())
            .collect();

        if tokens.last().is_none_or(|token| token.kind != TokenKind::Eof) {
            let (position, end) = tokens
                .last()
                .map(|token| (token.position(), token.span.end))
                .unwrap_or((Position::START, Span::DUMMY.end));
            tokens.push(Token::new(
                TokenKind::Eof,
                "",
                position,
                Span::new(end, end),
            ));
        }

        Self {
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            depth: 0,
            limits,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// The diagnostics as `"<message> at line L, column C"` strings.
    pub fn error_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Parse a complete translation unit.
    pub fn parse_program(&mut self) -> AstNode {
        let mut program = AstNode::new(NodeLabel::Program);
        // Suppress cascades of "expected declaration" within one run of junk.
        let mut recovering = false;

        while !self.at_end() {
            if self.too_many_errors() {
                // Recorded past the cap on purpose: it is the last one.
                let diagnostic = self
                    .diagnostic(ErrorCode::TooManyErrors, "Too many errors, stopping parsing")
                    .with_note(format!(
                        "parsing stopped after {} errors; the rest of the input was not checked",
                        self.limits.max_errors
                    ));
                warn!(errors = self.diagnostics.len(), "giving up on this input");
                self.diagnostics.push(diagnostic);
                break;
            }

            if self.check(TokenKind::Preprocessor) {
                program.add_child(self.parse_preprocessor());
                continue;
            }

            if self.check(TokenKind::Error) {
                self.lexical_error();
                continue;
            }

            if !self.current().is_base_type() {
                if !recovering {
                    let found = self.found();
                    self.error(
                        ErrorCode::ExpectedDeclaration,
                        format!("Expected declaration, got {found}"),
                    );
                }
                recovering = !self.synchronize();
                continue;
            }

            match self.parse_declaration() {
                Some(declaration) => {
                    recovering = false;
                    program.add_child(declaration);
                }
                None => recovering = !self.synchronize(),
            }
        }

        debug!(
            items = program.children.len(),
            errors = self.diagnostics.len(),
            "parsed program"
        );
        program
    }

    fn parse_preprocessor(&mut self) -> AstNode {
        let token = self.current().clone();
        self.advance();
        AstNode::with_value(NodeLabel::Preprocessor, &token.text).at(token.position())
    }

    // ========== Declarations ==========

    /// `type name ...`: a function or a variable declaration.
    fn parse_declaration(&mut self) -> Option<AstNode> {
        let type_token = self.current().clone();
        if !type_token.is_base_type() {
            return None;
        }
        self.advance();

        let Some(name) = self.match_kind(TokenKind::Identifier) else {
            let found = self.found();
            self.error(
                ErrorCode::UnexpectedToken,
                format!(
                    "Expected identifier after type '{}', got {found}",
                    type_token.text
                ),
            );
            return None;
        };

        if self.check(TokenKind::LeftParen) {
            self.parse_function(type_token, name)
        } else {
            Some(self.parse_variable_declaration(type_token, name))
        }
    }

    fn parse_function(&mut self, return_type: Token, name: Token) -> Option<AstNode> {
        self.guarded(|p| {
            let mut function =
                AstNode::with_value(NodeLabel::Function, &name.text).at(name.position());
            function.add_child(
                AstNode::with_value(NodeLabel::ReturnType, &return_type.text)
                    .at(return_type.position()),
            );

            if p.expect(TokenKind::LeftParen).is_none() {
                return Some(function);
            }
            function.add_child(p.parse_parameter_list());
            p.close_delimiter(DelimiterKind::Paren);

            if p.check(TokenKind::LeftBrace) {
                if let Some(body) = p.parse_compound_statement() {
                    function.add_child(body);
                }
            } else {
                p.expect(TokenKind::Semicolon);
            }

            Some(function)
        })
    }

    fn parse_parameter_list(&mut self) -> AstNode {
        let mut params = AstNode::new(NodeLabel::Parameters);

        if self.check(TokenKind::RightParen) {
            return params;
        }
        // `f(void)` declares no parameters.
        if self.current().is_keyword("void") && self.peek_kind(1) == TokenKind::RightParen {
            self.advance();
            return params;
        }

        loop {
            if self.at_end() || self.check(TokenKind::RightParen) {
                break;
            }

            let Some(type_token) = self.match_kind(TokenKind::Keyword) else {
                let found = self.found();
                self.error(
                    ErrorCode::UnexpectedToken,
                    format!("Expected parameter type, got {found}"),
                );
                break;
            };

            let Some(name) = self.match_kind(TokenKind::Identifier) else {
                let found = self.found();
                self.error(
                    ErrorCode::UnexpectedToken,
                    format!("Expected parameter name, got {found}"),
                );
                break;
            };

            params.add_child(
                AstNode::with_value(NodeLabel::Parameter, &name.text)
                    .at(name.position())
                    .with_child(
                        AstNode::with_value(NodeLabel::Type, &type_token.text)
                            .at(type_token.position()),
                    ),
            );

            if self.match_kind(TokenKind::Comma).is_none() {
                break;
            }
        }

        params
    }

    fn parse_variable_declaration(&mut self, type_token: Token, name: Token) -> AstNode {
        let mut variable = AstNode::with_value(NodeLabel::VariableDeclaration, &name.text)
            .at(name.position())
            .with_child(
                AstNode::with_value(NodeLabel::Type, &type_token.text).at(type_token.position()),
            );

        if self.match_kind(TokenKind::LeftBracket).is_some() {
            if let Some(size) = self.match_kind(TokenKind::Integer) {
                variable.add_child(
                    AstNode::with_value(NodeLabel::ArraySize, &size.text).at(size.position()),
                );
            }
            self.close_delimiter(DelimiterKind::Bracket);
        }

        if let Some(assign) = self.match_kind(TokenKind::Assign) {
            if let Some(init) = self.operand(&assign, Self::parse_expression) {
                variable.add_child(
                    AstNode::new(NodeLabel::Initializer)
                        .at(assign.position())
                        .with_child(init),
                );
            }
        }

        self.expect(TokenKind::Semicolon);
        variable
    }

    // ========== Statements ==========

    fn parse_compound_statement(&mut self) -> Option<AstNode> {
        self.guarded(|p| {
            let open = p.expect(TokenKind::LeftBrace)?;
            let mut block = AstNode::new(NodeLabel::Block).at(open.position());

            while !p.check(TokenKind::RightBrace) && !p.at_end() {
                if p.too_many_errors() {
                    break;
                }

                if p.check(TokenKind::Preprocessor) {
                    block.add_child(p.parse_preprocessor());
                    continue;
                }

                // Empty statements leave no trace in a block.
                if p.match_kind(TokenKind::Semicolon).is_some() {
                    continue;
                }

                let before = p.pos;
                match p.parse_statement() {
                    Some(statement) => block.add_child(statement),
                    None => {
                        p.skip_to_next_statement();
                        if p.pos == before {
                            p.advance();
                        }
                    }
                }
            }

            p.expect(TokenKind::RightBrace);
            Some(block)
        })
    }

    fn parse_statement(&mut self) -> Option<AstNode> {
        self.guarded(|p| {
            let token = p.current().clone();

            if token.kind == TokenKind::Keyword {
                match token.text.as_str() {
                    "if" => return p.parse_if_statement(),
                    "while" => return p.parse_while_statement(),
                    "for" => return p.parse_for_statement(),
                    "return" => return p.parse_return_statement(),
                    _ if token.is_base_type() => return p.parse_declaration(),
                    _ => {}
                }
            }

            if token.kind == TokenKind::LeftBrace {
                return p.parse_compound_statement();
            }

            // A lone `;` is an empty statement.
            if p.match_kind(TokenKind::Semicolon).is_some() {
                return Some(AstNode::new(NodeLabel::ExpressionStatement).at(token.position()));
            }

            let errors = p.diagnostics.len();
            match p.parse_expression() {
                Some(expr) => {
                    p.expect(TokenKind::Semicolon);
                    Some(
                        AstNode::new(NodeLabel::ExpressionStatement)
                            .at(token.position())
                            .with_child(expr),
                    )
                }
                None => {
                    if p.diagnostics.len() == errors {
                        let found = p.found();
                        p.error(
                            ErrorCode::ExpectedExpression,
                            format!("Expected statement, got {found}"),
                        );
                    }
                    None
                }
            }
        })
    }

    fn parse_if_statement(&mut self) -> Option<AstNode> {
        let keyword = self.current().clone();
        self.advance();
        self.expect(TokenKind::LeftParen)?;

        let mut node = AstNode::new(NodeLabel::IfStatement).at(keyword.position());
        let condition = self.required_expression("in if condition");
        node.add_child(AstNode::new(NodeLabel::Condition).with_optional_child(condition));
        self.close_delimiter(DelimiterKind::Paren);

        if let Some(then) = self.parse_statement() {
            node.add_child(AstNode::new(NodeLabel::ThenStatement).with_child(then));
        }

        if self.current().is_keyword("else") {
            self.advance();
            if let Some(otherwise) = self.parse_statement() {
                node.add_child(AstNode::new(NodeLabel::ElseStatement).with_child(otherwise));
            }
        }

        Some(node)
    }

    fn parse_while_statement(&mut self) -> Option<AstNode> {
        let keyword = self.current().clone();
        self.advance();
        self.expect(TokenKind::LeftParen)?;

        let mut node = AstNode::new(NodeLabel::WhileStatement).at(keyword.position());
        let condition = self.required_expression("in while condition");
        node.add_child(AstNode::new(NodeLabel::Condition).with_optional_child(condition));
        self.close_delimiter(DelimiterKind::Paren);

        if let Some(body) = self.parse_statement() {
            node.add_child(AstNode::new(NodeLabel::Body).with_child(body));
        }

        Some(node)
    }

    /// `for (init; condition; increment) body`, each clause optional.
    fn parse_for_statement(&mut self) -> Option<AstNode> {
        let keyword = self.current().clone();
        self.advance();
        self.expect(TokenKind::LeftParen)?;

        let mut node = AstNode::new(NodeLabel::ForStatement).at(keyword.position());

        let init = if self.match_kind(TokenKind::Semicolon).is_some() {
            None
        } else if self.current().is_base_type() {
            // The declaration consumes its own `;`.
            self.parse_declaration()
        } else {
            let start = self.current().position();
            let expr = self.required_expression("in for initializer");
            self.expect(TokenKind::Semicolon);
            expr.map(|expr| {
                AstNode::new(NodeLabel::ExpressionStatement)
                    .at(start)
                    .with_child(expr)
            })
        };
        node.add_child(AstNode::new(NodeLabel::Initialization).with_optional_child(init));

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            self.required_expression("in for condition")
        };
        node.add_child(AstNode::new(NodeLabel::Condition).with_optional_child(condition));
        self.expect(TokenKind::Semicolon);

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            self.required_expression("in for increment")
        };
        node.add_child(AstNode::new(NodeLabel::Increment).with_optional_child(increment));
        self.close_delimiter(DelimiterKind::Paren);

        if let Some(body) = self.parse_statement() {
            node.add_child(AstNode::new(NodeLabel::Body).with_child(body));
        }

        Some(node)
    }

    fn parse_return_statement(&mut self) -> Option<AstNode> {
        let keyword = self.current().clone();
        self.advance();

        let mut node = AstNode::new(NodeLabel::ReturnStatement).at(keyword.position());
        if !self.check(TokenKind::Semicolon) {
            node = node.with_optional_child(self.required_expression("after 'return'"));
        }
        self.expect(TokenKind::Semicolon);

        Some(node)
    }

    // ========== Expressions ==========

    fn parse_expression(&mut self) -> Option<AstNode> {
        self.guarded(Self::parse_assignment_expr)
    }

    /// `=` is the only right-associative operator.
    fn parse_assignment_expr(&mut self) -> Option<AstNode> {
        let left = self.parse_logical_or_expr();

        let Some(op) = self.match_kind(TokenKind::Assign) else {
            return left;
        };

        let right = self.operand(&op, |p| p.guarded(Self::parse_assignment_expr));
        match (left, right) {
            (Some(target), Some(value)) => Some(
                AstNode::with_value(NodeLabel::Assignment, &op.text)
                    .at(op.position())
                    .with_child(target)
                    .with_child(value),
            ),
            (left, _) => left,
        }
    }

    fn parse_logical_or_expr(&mut self) -> Option<AstNode> {
        self.parse_binary(&[TokenKind::Or], Self::parse_logical_and_expr)
    }

    fn parse_logical_and_expr(&mut self) -> Option<AstNode> {
        self.parse_binary(&[TokenKind::And], Self::parse_equality_expr)
    }

    fn parse_equality_expr(&mut self) -> Option<AstNode> {
        self.parse_binary(
            &[TokenKind::Equal, TokenKind::NotEqual],
            Self::parse_relational_expr,
        )
    }

    fn parse_relational_expr(&mut self) -> Option<AstNode> {
        self.parse_binary(
            &[
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
            ],
            Self::parse_additive_expr,
        )
    }

    fn parse_additive_expr(&mut self) -> Option<AstNode> {
        self.parse_binary(
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative_expr,
        )
    }

    fn parse_multiplicative_expr(&mut self) -> Option<AstNode> {
        self.parse_binary(
            &[TokenKind::Multiply, TokenKind::Divide, TokenKind::Modulo],
            Self::parse_unary_expr,
        )
    }

    /// One precedence level: `next (op next)*`, folded to the left.
    fn parse_binary(&mut self, ops: &[TokenKind], next: ParseFn) -> Option<AstNode> {
        let mut left = next(self);

        while ops.contains(&self.current_kind()) {
            let op = self.current().clone();
            self.advance();
            let right = self.operand(&op, next);

            match (left, right) {
                (Some(lhs), Some(rhs)) => {
                    left = Some(
                        AstNode::with_value(NodeLabel::BinaryOp, &op.text)
                            .at(op.position())
                            .with_child(lhs)
                            .with_child(rhs),
                    );
                }
                (lhs, _) => {
                    left = lhs;
                    break;
                }
            }
        }

        left
    }

    fn parse_unary_expr(&mut self) -> Option<AstNode> {
        if matches!(
            self.current_kind(),
            TokenKind::Not | TokenKind::Minus | TokenKind::Plus
        ) {
            let op = self.current().clone();
            self.advance();
            let operand = self.operand(&op, |p| p.guarded(Self::parse_unary_expr))?;
            return Some(
                AstNode::with_value(NodeLabel::UnaryOp, &op.text)
                    .at(op.position())
                    .with_child(operand),
            );
        }

        self.parse_postfix_expr()
    }

    /// Calls and array indexing, applied left to right.
    fn parse_postfix_expr(&mut self) -> Option<AstNode> {
        let mut expr = self.parse_primary_expr()?;

        for _ in 0..self.limits.postfix_iterations {
            match self.current_kind() {
                TokenKind::LeftParen => {
                    self.advance();
                    let args = self.parse_argument_list();
                    self.close_delimiter(DelimiterKind::Paren);
                    expr = wrap(NodeLabel::FunctionCall, expr).with_child(args);
                }
                TokenKind::LeftBracket => {
                    let open = self.current().clone();
                    self.advance();
                    let index = self.operand(&open, Self::parse_expression);
                    self.close_delimiter(DelimiterKind::Bracket);
                    if let Some(index) = index {
                        expr = wrap(NodeLabel::ArrayAccess, expr).with_child(index);
                    }
                }
                _ => break,
            }
        }

        if matches!(
            self.current_kind(),
            TokenKind::LeftParen | TokenKind::LeftBracket
        ) {
            self.error(
                ErrorCode::IterationLimit,
                "Maximum iterations exceeded in postfix expression",
            );
        }

        Some(expr)
    }

    fn parse_argument_list(&mut self) -> AstNode {
        let mut args = AstNode::new(NodeLabel::Arguments);
        let mut count = 0;

        while !self.check(TokenKind::RightParen) && !self.at_end() {
            if count == self.limits.max_arguments {
                self.error(ErrorCode::IterationLimit, "Too many arguments in function call");
                break;
            }
            count += 1;

            if let Some(arg) = self.required_expression("in argument list") {
                args.add_child(arg);
            }

            if self.match_kind(TokenKind::Comma).is_none() {
                break;
            }
        }

        args
    }

    fn parse_primary_expr(&mut self) -> Option<AstNode> {
        let token = self.current().clone();

        let label = match token.kind {
            TokenKind::Identifier => NodeLabel::Identifier,
            TokenKind::Integer => NodeLabel::Integer,
            TokenKind::Float => NodeLabel::Float,
            TokenKind::Character => NodeLabel::Character,
            TokenKind::String => NodeLabel::String,
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.operand(&token, Self::parse_expression);
                self.close_delimiter(DelimiterKind::Paren);
                return expr;
            }
            TokenKind::Error => {
                self.lexical_error();
                return None;
            }
            // Callers decide whether nothing here is an error.
            TokenKind::Eof
            | TokenKind::Semicolon
            | TokenKind::RightParen
            | TokenKind::RightBrace => return None,
            _ => {
                self.error(
                    ErrorCode::UnexpectedToken,
                    format!("Unexpected token {}", token.kind),
                );
                self.advance();
                return None;
            }
        };

        self.advance();
        Some(AstNode::with_value(label, &token.text).at(token.position()))
    }

    /// Parse the operand after `op`, reporting its absence unless the
    /// operand's own parse already did.
    fn operand(
        &mut self,
        op: &Token,
        parse: impl FnOnce(&mut Self) -> Option<AstNode>,
    ) -> Option<AstNode> {
        let errors = self.diagnostics.len();
        let operand = parse(self);
        if operand.is_none() && self.diagnostics.len() == errors {
            let found = self.found();
            self.error(
                ErrorCode::ExpectedExpression,
                format!("Expected expression after '{}', got {found}", op.text),
            );
        }
        operand
    }

    fn required_expression(&mut self, context: &str) -> Option<AstNode> {
        let errors = self.diagnostics.len();
        let expr = self.parse_expression();
        if expr.is_none() && self.diagnostics.len() == errors {
            let found = self.found();
            self.error(
                ErrorCode::ExpectedExpression,
                format!("Expected expression {context}, got {found}"),
            );
        }
        expr
    }

    // ========== Token Helpers ==========

    fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + offset).min(last)].kind
    }

    fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Consume and return the current token if it has the given kind.
    fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            let token = self.current().clone();
            self.advance();
            Some(token)
        } else {
            None
        }
    }

    /// Like [`Parser::match_kind`], recording a diagnostic on failure.
    /// The caller decides how to carry on.
    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.match_kind(kind);
        if token.is_none() {
            let code = match kind {
                TokenKind::Semicolon => ErrorCode::MissingSemicolon,
                TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                    ErrorCode::UnclosedDelimiter
                }
                _ => ErrorCode::UnexpectedToken,
            };
            let found = self.found();
            self.error(code, format!("Expected {kind}, got {found}"));
        }
        token
    }

    /// Name of the current token for messages.
    fn found(&self) -> String {
        let token = self.current();
        match token.kind {
            TokenKind::Error => format!("{} ({})", token.kind, token.text),
            kind => kind.to_string(),
        }
    }

    fn diagnostic(&self, code: ErrorCode, message: impl Into<String>) -> Diagnostic {
        let token = self.current();
        Diagnostic::error(DiagnosticKind::Parser, token.position(), token.span, message)
            .with_code(code)
            .with_label(Label::new(token.span, "here"))
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        if self.too_many_errors() {
            return;
        }
        let diagnostic = self.diagnostic(code, message);
        debug!(%diagnostic, "syntax error");
        self.diagnostics.push(diagnostic);
    }

    /// Report the lexer's error token under the cursor and step past it.
    fn lexical_error(&mut self) {
        let token = self.current().clone();
        if !self.too_many_errors() {
            let diagnostic = Diagnostic::error(
                DiagnosticKind::Lexer,
                token.position(),
                token.span,
                &token.text,
            )
            .with_code(lexical_error_code(&token.text))
            .with_label(Label::new(token.span, "here"));
            debug!(%diagnostic, "lexical error");
            self.diagnostics.push(diagnostic);
        }
        self.advance();
    }

    fn too_many_errors(&self) -> bool {
        self.diagnostics.len() >= self.limits.max_errors
    }

    /// Run a rule that may recurse into itself, one level deeper.
    /// The depth is restored on every path out of `parse`.
    fn guarded<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.depth += 1;
        let result = if self.depth > self.limits.max_depth {
            self.error(
                ErrorCode::RecursionLimit,
                "Maximum recursion depth exceeded - possible infinite loop",
            );
            None
        } else {
            parse(self)
        };
        self.depth -= 1;
        result
    }

    // ========== Error Recovery ==========

    /// Expect the closer of `kind`, skipping to it if it is missing.
    fn close_delimiter(&mut self, kind: DelimiterKind) {
        if self.expect(kind.closing_token()).is_none() {
            self.skip_until_balanced(kind);
        }
    }

    /// Skip past the closer matching an already consumed opener.
    ///
    /// Stops after the matching closer, before a statement boundary
    /// (`;`, `{`, `}`), at `Eof`, or after `balanced_skip` tokens.
    fn skip_until_balanced(&mut self, kind: DelimiterKind) {
        let mut depth = 1usize;
        let mut skipped = 0;

        while !self.at_end() && skipped < self.limits.balanced_skip {
            let current = self.current_kind();

            if current == kind.opening_token() {
                depth += 1;
            } else if current == kind.closing_token() {
                depth -= 1;
                if depth == 0 {
                    self.advance();
                    return;
                }
            } else if is_delimiter_boundary(current) {
                trace!(?kind, skipped, "delimiter skip stopped at statement boundary");
                return;
            }

            self.advance();
            skipped += 1;
        }
    }

    /// Skip the rest of a malformed statement inside a block.
    fn skip_to_next_statement(&mut self) {
        let start = self.pos;

        while !self.at_end() && self.pos - start < self.limits.statement_skip {
            let token = self.current();

            if is_recovery_token(token.kind) {
                if token.kind == TokenKind::Semicolon {
                    self.advance();
                }
                break;
            }

            if is_statement_keyword(token) {
                break;
            }

            self.advance();
        }

        trace!(skipped = self.pos - start, "skipped to next statement");
    }

    /// Resynchronize at top level after a failed declaration.
    /// Always moves past the current token first.
    ///
    /// Returns true when a `;` was consumed, i.e. the broken item is over.
    fn synchronize(&mut self) -> bool {
        if self.match_kind(TokenKind::Semicolon).is_some() {
            return true;
        }
        self.advance();

        while !self.at_end() {
            if self.match_kind(TokenKind::Semicolon).is_some() {
                return true;
            }

            if is_statement_keyword(self.current())
                || matches!(
                    self.current_kind(),
                    TokenKind::LeftBrace | TokenKind::RightBrace
                )
            {
                return false;
            }

            self.advance();
        }
        false
    }
}

/// A node for `label` whose first child is `first`, positioned where
/// `first` starts.
fn wrap(label: NodeLabel, first: AstNode) -> AstNode {
    let mut node = AstNode::new(label);
    node.line = first.line;
    node.column = first.column;
    node.with_child(first)
}

fn lexical_error_code(message: &str) -> ErrorCode {
    if message == UNTERMINATED_STRING {
        ErrorCode::UnterminatedString
    } else if message == UNTERMINATED_CHAR {
        ErrorCode::UnterminatedChar
    } else if message == UNTERMINATED_COMMENT {
        ErrorCode::UnterminatedComment
    } else if message.starts_with(UNEXPECTED_CHARACTER) {
        ErrorCode::UnexpectedCharacter
    } else {
        ErrorCode::UnexpectedToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfront_lexer::tokenize_all;

    fn parser(source: &str) -> Parser {
        Parser::new(tokenize_all(source))
    }

    #[test]
    fn test_trivia_is_dropped() {
        let p = parser("// comment\nint /* c */ x;\n");
        let kinds: Vec<_> = p.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_missing_eof_is_supplied() {
        let p = Parser::new(Vec::new());
        assert_eq!(p.tokens.len(), 1);
        assert!(p.at_end());
    }

    #[test]
    fn test_match_leaves_cursor_on_mismatch() {
        let mut p = parser("x ;");
        assert!(p.match_kind(TokenKind::Semicolon).is_none());
        assert_eq!(p.pos, 0);
        assert!(p.diagnostics.is_empty());
        assert_eq!(
            p.match_kind(TokenKind::Identifier).map(|t| t.text),
            Some("x".to_string())
        );
        assert_eq!(p.pos, 1);
    }

    #[test]
    fn test_expect_records_expected_and_found() {
        let mut p = parser("\n  x");
        assert!(p.expect(TokenKind::Semicolon).is_none());
        assert_eq!(p.pos, 0);
        assert_eq!(
            p.error_messages(),
            vec!["Expected SEMICOLON, got IDENTIFIER at line 2, column 3".to_string()]
        );
        assert_eq!(p.diagnostics[0].code, Some(ErrorCode::MissingSemicolon));
    }

    #[test]
    fn test_skip_until_balanced_consumes_matching_closer() {
        // The opening `(` has already been consumed.
        let mut p = parser("a (b) c) d");
        p.skip_until_balanced(DelimiterKind::Paren);
        assert_eq!(p.current().text, "d");
    }

    #[test]
    fn test_skip_until_balanced_stops_at_boundary() {
        let mut p = parser("a b { c }");
        p.skip_until_balanced(DelimiterKind::Paren);
        assert_eq!(p.current_kind(), TokenKind::LeftBrace);
    }

    #[test]
    fn test_skip_until_balanced_is_bounded() {
        let source = "x ".repeat(500);
        let mut p = parser(&source);
        p.skip_until_balanced(DelimiterKind::Paren);
        assert_eq!(p.pos, ParseLimits::DEFAULT.balanced_skip);
    }

    #[test]
    fn test_skip_to_next_statement_consumes_semicolon() {
        let mut p = parser("a b c ; d");
        p.skip_to_next_statement();
        assert_eq!(p.current().text, "d");
    }

    #[test]
    fn test_skip_to_next_statement_stops_at_keyword() {
        let mut p = parser("a b while (x) y;");
        p.skip_to_next_statement();
        assert!(p.current().is_keyword("while"));
    }

    #[test]
    fn test_skip_to_next_statement_is_bounded() {
        let source = "x ".repeat(300);
        let mut p = parser(&source);
        p.skip_to_next_statement();
        assert_eq!(p.pos, ParseLimits::DEFAULT.statement_skip);
    }

    #[test]
    fn test_synchronize_always_advances() {
        let mut p = parser("int x;");
        // `int` skipped, then `x`, then `;` consumed.
        assert!(p.synchronize());
        assert!(p.at_end());

        let mut p = parser("{ int");
        assert!(!p.synchronize());
        assert!(p.current().is_keyword("int"));

        let mut p = parser("; x");
        assert!(p.synchronize());
        assert_eq!(p.current().text, "x");
    }

    #[test]
    fn test_depth_is_restored_after_guarded_failure() {
        let limits = ParseLimits::DEFAULT.with_max_depth(3);
        let mut p = Parser::with_limits(tokenize_all("((((((1))))))"), limits);
        let _ = p.parse_expression();
        assert_eq!(p.depth, 0);
        assert!(
            p.diagnostics
                .iter()
                .any(|d| d.code == Some(ErrorCode::RecursionLimit))
        );
    }

    #[test]
    fn test_error_cap() {
        let limits = ParseLimits::DEFAULT.with_max_errors(2);
        let mut p = Parser::with_limits(tokenize_all("x"), limits);
        for _ in 0..5 {
            p.error(ErrorCode::UnexpectedToken, "boom");
        }
        assert_eq!(p.diagnostics.len(), 2);
    }

    #[test]
    fn test_lexical_error_codes() {
        assert_eq!(
            lexical_error_code(UNTERMINATED_STRING),
            ErrorCode::UnterminatedString
        );
        assert_eq!(
            lexical_error_code("Unexpected character: @"),
            ErrorCode::UnexpectedCharacter
        );
    }
}
