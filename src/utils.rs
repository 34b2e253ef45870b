/// Render a float the way it reads back: always with a fractional part or an
/// exponent, so `2.0` never collapses into the integer `2`.
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Render a float for re-parsing inside an expression. Never uses exponent
/// notation, since `e-` would be split as a subtraction.
pub fn format_float_plain(value: f64) -> String {
    let text = format!("{}", value);
    if value.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Resolve the escape sequences allowed inside quoted strings.
///
/// Unknown sequences keep their backslash.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let escaped = match chars.peek() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('\\') => '\\',
            Some('"') => '"',
            Some('\'') => '\'',
            _ => {
                out.push('\\');
                continue;
            }
        };
        chars.next();
        out.push(escaped);
    }

    out
}

/// Quote a string so that `unescape` on its interior yields it back.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_keeps_fraction() {
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(3.14), "3.14");
        assert_eq!(format_float(-0.5), "-0.5");
    }

    #[test]
    fn test_format_float_plain_avoids_exponent() {
        assert_eq!(format_float_plain(4.0), "4.0");
        assert_eq!(format_float_plain(0.0000001), "0.0000001");
    }

    #[test]
    fn test_unescape_known_and_unknown() {
        assert_eq!(unescape(r"Line1\nLine2"), "Line1\nLine2");
        assert_eq!(unescape(r#"He said, \"Hello!\""#), "He said, \"Hello!\"");
        assert_eq!(unescape(r"Path\\to\\file"), "Path\\to\\file");
        assert_eq!(unescape(r"\q stays"), "\\q stays");
        assert_eq!(unescape("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_quote_round_trips_through_unescape() {
        let original = "say \"hi\"\\now";
        let quoted = quote(original);
        assert_eq!(unescape(&quoted[1..quoted.len() - 1]), original);
    }
}
