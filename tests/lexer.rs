//! Integration tests for cfront-lexer crate.

use cfront_lexer::{
    Action, Lexer, LexerState, Token, TokenCategory, TokenKind, Transition, UNTERMINATED_CHAR,
    UNTERMINATED_COMMENT, UNTERMINATED_STRING, classify, tokenize_all, transition,
};

fn lex(source: &str) -> Vec<TokenKind> {
    tokenize_all(source).into_iter().map(|t| t.kind).collect()
}

fn lex_pairs(source: &str) -> Vec<(TokenKind, String)> {
    tokenize_all(source)
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

fn pair(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

// ============================================================================
// Longest Match
// ============================================================================

#[test]
fn test_left_shift_is_one_token() {
    assert_eq!(lex("<<"), vec![TokenKind::LeftShift, TokenKind::Eof]);
}

#[test]
fn test_less_equal_is_one_token() {
    assert_eq!(lex("<="), vec![TokenKind::LessEqual, TokenKind::Eof]);
}

#[test]
fn test_less_leaves_next_character() {
    assert_eq!(
        lex_pairs("<a"),
        vec![
            pair(TokenKind::Less, "<"),
            pair(TokenKind::Identifier, "a"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_doubled_operators() {
    assert_eq!(
        lex("== != >= >> && || ++ -- ->"),
        vec![
            TokenKind::Equal,
            TokenKind::NotEqual,
            TokenKind::GreaterEqual,
            TokenKind::RightShift,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Increment,
            TokenKind::Decrement,
            TokenKind::Arrow,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_single_operators() {
    assert_eq!(
        lex("= ! > & | + - * / % ^ ~"),
        vec![
            TokenKind::Assign,
            TokenKind::Not,
            TokenKind::Greater,
            TokenKind::BitwiseAnd,
            TokenKind::BitwiseOr,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::Modulo,
            TokenKind::BitwiseXor,
            TokenKind::BitwiseNot,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        lex("a+=b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        lex("x<-1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Less,
            TokenKind::Minus,
            TokenKind::Integer,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_punctuation() {
    assert_eq!(
        lex("; , ( ) { } [ ] ."),
        vec![
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Dot,
            TokenKind::Eof,
        ]
    );
}

// ============================================================================
// Keywords and Identifiers
// ============================================================================

#[test]
fn test_keyword_identifier_boundary() {
    assert_eq!(
        lex_pairs("intx"),
        vec![pair(TokenKind::Identifier, "intx"), pair(TokenKind::Eof, "")]
    );
    assert_eq!(
        lex_pairs("int"),
        vec![pair(TokenKind::Keyword, "int"), pair(TokenKind::Eof, "")]
    );
}

#[test]
fn test_keywords() {
    let tokens = tokenize_all("if else while for return struct typedef sizeof");
    assert!(
        tokens[..8]
            .iter()
            .all(|t| t.kind == TokenKind::Keyword)
    );
}

#[test]
fn test_identifiers() {
    assert_eq!(
        lex_pairs("_tmp x1 returnValue"),
        vec![
            pair(TokenKind::Identifier, "_tmp"),
            pair(TokenKind::Identifier, "x1"),
            pair(TokenKind::Identifier, "returnValue"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(
        lex_pairs("42 3.14 007"),
        vec![
            pair(TokenKind::Integer, "42"),
            pair(TokenKind::Float, "3.14"),
            pair(TokenKind::Integer, "007"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_trailing_dot_splits() {
    assert_eq!(
        lex_pairs("3."),
        vec![
            pair(TokenKind::Integer, "3"),
            pair(TokenKind::Dot, "."),
            pair(TokenKind::Eof, ""),
        ]
    );
    assert_eq!(
        lex_pairs("3.x"),
        vec![
            pair(TokenKind::Integer, "3"),
            pair(TokenKind::Dot, "."),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_trailing_dot_positions() {
    let tokens = tokenize_all("3.;");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
    assert_eq!(tokens[2].kind, TokenKind::Semicolon);
    assert_eq!((tokens[2].line, tokens[2].column), (1, 3));
}

#[test]
fn test_strings() {
    assert_eq!(
        lex_pairs(r#""hello" "a\"b""#),
        vec![
            pair(TokenKind::String, r#""hello""#),
            pair(TokenKind::String, r#""a\"b""#),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_characters() {
    assert_eq!(
        lex_pairs(r"'a' '\n' '\''"),
        vec![
            pair(TokenKind::Character, "'a'"),
            pair(TokenKind::Character, r"'\n'"),
            pair(TokenKind::Character, r"'\''"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

// ============================================================================
// Comments and Layout
// ============================================================================

#[test]
fn test_line_comment_leaves_newline() {
    assert_eq!(
        lex_pairs("// c\nx;"),
        vec![
            pair(TokenKind::SingleComment, "// c"),
            pair(TokenKind::Newline, "\n"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Semicolon, ";"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_line_comment_at_end_of_input() {
    assert_eq!(
        lex_pairs("x // done"),
        vec![
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::SingleComment, "// done"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_block_comments() {
    assert_eq!(
        lex_pairs("/* a * b */x/***/"),
        vec![
            pair(TokenKind::MultiComment, "/* a * b */"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::MultiComment, "/***/"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_block_comment_spans_lines() {
    let tokens = tokenize_all("/* one\ntwo */ y");
    assert_eq!(tokens[0].kind, TokenKind::MultiComment);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!((tokens[1].line, tokens[1].column), (2, 8));
}

#[test]
fn test_preprocessor_line() {
    assert_eq!(
        lex_pairs("#include <stdio.h>\nint"),
        vec![
            pair(TokenKind::Preprocessor, "#include <stdio.h>"),
            pair(TokenKind::Newline, "\n"),
            pair(TokenKind::Keyword, "int"),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(
        lex(" \t x \r\n"),
        vec![TokenKind::Identifier, TokenKind::Newline, TokenKind::Eof]
    );
}

#[test]
fn test_positions() {
    let tokens = tokenize_all("int\n  x = 1;");
    let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(
        positions,
        vec![(1, 1), (1, 4), (2, 3), (2, 5), (2, 7), (2, 8), (2, 9)]
    );
}

// ============================================================================
// Lexical Errors
// ============================================================================

#[test]
fn test_unexpected_character() {
    let tokens = tokenize_all("a @ b");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].text, "Unexpected character: @");
    assert_eq!(tokens[1].column, 3);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        lex_pairs("\"abc"),
        vec![
            pair(TokenKind::Error, UNTERMINATED_STRING),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_unterminated_char() {
    assert_eq!(
        lex_pairs("'a"),
        vec![
            pair(TokenKind::Error, UNTERMINATED_CHAR),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_unterminated_comment() {
    assert_eq!(
        lex_pairs("x /* never closed *"),
        vec![
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Error, UNTERMINATED_COMMENT),
            pair(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn test_error_span_covers_lexeme() {
    let source = "x = \"open";
    let tokens = tokenize_all(source);
    assert_eq!(tokens[2].span.slice(source), "\"open");
}

// ============================================================================
// End of Input
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(lex(""), vec![TokenKind::Eof]);
    assert_eq!(lex("   \t "), vec![TokenKind::Eof]);
}

#[test]
fn test_eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_iterator_stops_after_eof() {
    let tokens: Vec<Token> = Lexer::new("a b").collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn test_exactly_one_eof() {
    let samples = [
        "",
        "int main() { return 0; }",
        "\"unterminated",
        "/* open",
        "3.",
        "@@@",
        "#define X 1",
        "'",
    ];
    for source in samples {
        let kinds = lex(source);
        assert_eq!(kinds.last(), Some(&TokenKind::Eof), "source: {source:?}");
        assert_eq!(
            kinds.iter().filter(|k| **k == TokenKind::Eof).count(),
            1,
            "source: {source:?}"
        );
    }
}

#[test]
fn test_spans_cover_everything_but_whitespace() {
    let source = "#include <stdio.h>\nint main(void) {\n  // loop\n  for (int i = 0; i <= 10; i++) { x[i] = 'c' + 1.5; }\n  /* done */ return a != b && !c;\n}\n@ \"tail";
    let tokens = tokenize_all(source);

    let mut cursor = 0;
    for token in &tokens {
        let range = token.span.range();
        assert!(range.start >= cursor, "overlap at {token}");
        let gap = &source[cursor..range.start];
        assert!(
            gap.chars().all(|c| c.is_whitespace() && c != '\n'),
            "unexpected gap {gap:?} before {token}"
        );
        cursor = range.end;
    }
    assert_eq!(cursor, source.len());
}

// ============================================================================
// Transition Table
// ============================================================================

#[test]
fn test_table_is_inspectable() {
    assert_eq!(
        transition(LexerState::Less, classify('<')),
        Some(Transition {
            next: LexerState::Start,
            action: Action::Emit(TokenKind::LeftShift),
        })
    );
    assert_eq!(transition(LexerState::Less, classify('a')), None);
    assert_eq!(
        transition(LexerState::Start, classify(' ')).map(|t| t.action),
        Some(Action::Skip)
    );
}

#[test]
fn test_token_categories() {
    let categories: Vec<_> = tokenize_all("int x = 1; // c")
        .iter()
        .map(|t| t.kind.category())
        .collect();
    assert_eq!(
        categories,
        vec![
            TokenCategory::Keyword,
            TokenCategory::Identifier,
            TokenCategory::Operator,
            TokenCategory::Number,
            TokenCategory::Punctuation,
            TokenCategory::Comment,
            TokenCategory::Other,
        ]
    );
}

#[test]
fn test_token_display() {
    let tokens = tokenize_all("\n  main");
    assert_eq!(tokens[1].to_string(), "Token(IDENTIFIER, 'main', 2:3)");
}
