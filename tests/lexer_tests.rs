// tests/lexer_tests.rs

use chrono::NaiveDate;
use facets_sql::ast::Token;
use facets_sql::lexer::{LexError, Lexer};
use rust_decimal::Decimal;
use std::str::FromStr;

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut result = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return result;
        }
        result.push(token);
    }
}

fn word(s: &str) -> Token {
    Token::Word(s.to_string())
}

// ============================================================================
// Punctuation and Operators
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        (":", Token::Colon),
        (",", Token::Comma),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        ("=", Token::Eq),
        ("<", Token::Lt),
        (">", Token::Gt),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_two_char_operators() {
    assert_eq!(tokens(">= <= !="), vec![Token::GtEq, Token::LtEq, Token::NotEq]);
}

#[test]
fn test_lone_bang_is_rejected() {
    let mut lexer = Lexer::new("!x");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar { ch: '!', position: 0 })
    );
}

#[test]
fn test_parentheses_are_rejected() {
    let mut lexer = Lexer::new("(a:b)");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar { ch: '(', .. })
    ));
}

// ============================================================================
// Words, Keywords and Literals
// ============================================================================

#[test]
fn test_filter_tokens() {
    assert_eq!(
        tokens("age:>14 tag:old OR tag:new"),
        vec![
            word("age"),
            Token::Colon,
            Token::Gt,
            Token::Number(Decimal::from(14)),
            word("tag"),
            Token::Colon,
            word("old"),
            Token::Or,
            word("tag"),
            Token::Colon,
            word("new"),
        ]
    );
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(tokens("AND OR and or"), vec![Token::And, Token::Or, word("and"), word("or")]);
}

#[test]
fn test_numbers() {
    assert_eq!(
        tokens("14 22.40 -3 1.2.3"),
        vec![
            Token::Number(Decimal::from(14)),
            Token::Number(Decimal::from_str("22.40").unwrap()),
            Token::Number(Decimal::from(-3)),
            word("1.2.3"),
        ]
    );
}

#[test]
fn test_dates() {
    assert_eq!(
        tokens("1989-07-24"),
        vec![Token::Date(NaiveDate::from_ymd_opt(1989, 7, 24).unwrap())]
    );

    let mut lexer = Lexer::new("2021-02-30");
    assert!(matches!(lexer.next_token(), Err(LexError::InvalidDate { .. })));
}

#[test]
fn test_booleans() {
    assert_eq!(tokens("true false"), vec![Token::Boolean(true), Token::Boolean(false)]);
}

#[test]
fn test_words_keep_symbols() {
    assert_eq!(tokens("image/jpeg a-b_c%"), vec![word("image/jpeg"), word("a-b_c%")]);
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_string_keeps_everything_but_quotes() {
    assert_eq!(
        tokens(r#""%><>?:L^#@! 'for long' a OR 1=1""#),
        vec![Token::String("%><>?:L^#@! 'for long' a OR 1=1".to_string())]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        tokens(r#""say \"hi\" \\ bye""#),
        vec![Token::String(r#"say "hi" \ bye"#.to_string())]
    );
}

#[test]
fn test_invalid_escape() {
    let mut lexer = Lexer::new(r#""\n""#);
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::InvalidEscape { ch: 'n', .. })
    ));
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new(r#"type:"abc"#);
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { position: 5 })
    );
}
