#[cfg(test)]
use super::*;

fn operand(s: &str) -> ExprToken {
    ExprToken::Operand(s.to_string())
}

fn op(c: char) -> ExprToken {
    ExprToken::Operator(Operator::from_char(c).unwrap())
}

#[test]
fn test_split_key_value_on_first_unquoted_equals() {
    assert_eq!(split_key_value("key1   =   \"value1\"  "), Some(("key1", "\"value1\"")));
    assert_eq!(split_key_value("expr = \"a=b\" + c"), Some(("expr", "\"a=b\" + c")));
    assert_eq!(split_key_value("url = 'x=1'=2"), Some(("url", "'x=1'=2")));
    assert_eq!(split_key_value("\"only = quoted\""), None);
    assert_eq!(split_key_value("no equals here"), None);
}

#[test]
fn test_escaped_quote_does_not_close_span() {
    let line = r#"k = "say \"a=b\"" "#;
    assert_eq!(split_key_value(line), Some(("k", r#""say \"a=b\"""#)));
    assert!(!contains_operator(r#""x \" + y""#));
}

#[test]
fn test_unterminated_quote_runs_to_end() {
    assert_eq!(find_unquoted("\"abc = def", |c| c == '='), None);
    assert_eq!(strip_line_comment("key = \"open // not a comment"), "key = \"open // not a comment");
}

#[test]
fn test_contains_operator_ignores_quotes() {
    assert!(!contains_operator("\"1.0.0-beta\""));
    assert!(!contains_operator("'a * b'"));
    assert!(contains_operator("first + \", \""));
    assert!(contains_operator("a%b"));
    assert!(!contains_operator("Data.users[0]"));
}

#[test]
fn test_strip_line_comment() {
    assert_eq!(strip_line_comment("key1 = \"value1\" // Inline comment"), "key1 = \"value1\" ");
    assert_eq!(strip_line_comment("url = \"http://example.com\""), "url = \"http://example.com\"");
    assert_eq!(strip_line_comment("// whole line"), "");
    assert_eq!(strip_line_comment("a = 1 / 2"), "a = 1 / 2");
}

#[test]
fn test_strip_block_comments_spans_lines() {
    let content = "a = 1\n/* Multi-line\n   comment */\nb = 2";
    assert_eq!(strip_block_comments(content), "a = 1\n\nb = 2");
    assert_eq!(strip_block_comments("x = 1 /* one */ + /* two */ 2"), "x = 1  +  2");
}

#[test]
fn test_strip_comments_combines_both_kinds() {
    let lines = strip_comments("// Only comments\n/* Multi-line\n   comment only */\nkey = 1 // tail");
    assert_eq!(lines, vec!["", "", "key = 1 "]);
}

#[test]
fn test_split_top_level_respects_nesting_and_quotes() {
    let parts = split_top_level(r#"1, [2, 3], {"a": 1, "b": 2}, "x,y", 'p,q'"#, ',');
    let parts: Vec<&str> = parts.iter().map(|s| s.trim()).collect();
    assert_eq!(parts, vec!["1", "[2, 3]", r#"{"a": 1, "b": 2}"#, r#""x,y""#, "'p,q'"]);
}

#[test]
fn test_split_top_level_without_delimiter() {
    assert_eq!(split_top_level("single", ','), vec!["single"]);
    assert_eq!(split_top_level("", ','), vec![""]);
}

#[test]
fn test_quote_tracker_state() {
    let mut tracker = QuoteTracker::new();
    assert!(tracker.step('a'));
    assert!(!tracker.step('"'));
    assert!(tracker.in_quote());
    assert!(!tracker.step('\''));
    assert!(tracker.in_quote());
    assert!(!tracker.step('"'));
    assert!(!tracker.in_quote());
}

#[test]
fn test_tokenize_arithmetic() {
    assert_eq!(
        tokenize_expression("a + b*3"),
        vec![operand("a"), op('+'), operand("b"), op('*'), operand("3")]
    );
    assert_eq!(
        tokenize_expression("8 * 2 / 4 % 3"),
        vec![operand("8"), op('*'), operand("2"), op('/'), operand("4"), op('%'), operand("3")]
    );
}

#[test]
fn test_tokenize_keeps_quoted_spans_and_dotted_paths() {
    assert_eq!(
        tokenize_expression("\"Welcome, \" + first_name + \" \" + Data.last"),
        vec![
            operand("\"Welcome, \""),
            op('+'),
            operand("first_name"),
            op('+'),
            operand("\" \""),
            op('+'),
            operand("Data.last"),
        ]
    );
    assert_eq!(
        tokenize_expression("'a - b' + 1"),
        vec![operand("'a - b'"), op('+'), operand("1")]
    );
}

#[test]
fn test_tokenize_brackets_are_plain_chars() {
    assert_eq!(
        tokenize_expression("Data.matrix[1][0] + 1"),
        vec![operand("Data.matrix[1][0]"), op('+'), operand("1")]
    );
}

#[test]
fn test_operator_precedence_class() {
    assert!(Operator::Mul.is_multiplicative());
    assert!(Operator::Rem.is_multiplicative());
    assert!(!Operator::Sub.is_multiplicative());
    assert_eq!(Operator::Div.symbol(), '/');
}
