use once_cell::sync::Lazy;
use regex::Regex;

use super::is_operator_char;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment pattern"));

/// Tracks whether the scan position is inside a quoted span.
///
/// A span opens on `"` or `'` and closes on the same quote unless that quote
/// is directly preceded by a backslash. An unterminated quote simply runs to
/// the end of input.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuoteTracker {
    quote: Option<char>,
    prev: Option<char>,
}

impl QuoteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance over `ch`. Returns true if `ch` lies outside any quoted span
    /// and is not itself a quote delimiter.
    pub fn step(&mut self, ch: char) -> bool {
        let prev = self.prev.replace(ch);
        match self.quote {
            None if ch == '"' || ch == '\'' => {
                self.quote = Some(ch);
                false
            }
            None => true,
            Some(q) if ch == q && prev != Some('\\') => {
                self.quote = None;
                false
            }
            Some(_) => false,
        }
    }

    pub fn in_quote(&self) -> bool {
        self.quote.is_some()
    }
}

/// Byte offset of the first unquoted char matching `pred`.
pub fn find_unquoted<F>(text: &str, pred: F) -> Option<usize>
where
    F: Fn(char) -> bool,
{
    let mut tracker = QuoteTracker::new();
    text.char_indices()
        .find(|&(_, ch)| tracker.step(ch) && pred(ch))
        .map(|(idx, _)| idx)
}

/// Like `find_unquoted`, but also skips chars nested inside `[...]` or `{...}`.
pub fn find_top_level<F>(text: &str, pred: F) -> Option<usize>
where
    F: Fn(char) -> bool,
{
    let mut tracker = QuoteTracker::new();
    let mut brackets = 0i32;
    let mut braces = 0i32;

    for (idx, ch) in text.char_indices() {
        if !tracker.step(ch) {
            continue;
        }
        match ch {
            '[' => brackets += 1,
            ']' => brackets -= 1,
            '{' => braces += 1,
            '}' => braces -= 1,
            _ if brackets == 0 && braces == 0 && pred(ch) => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Split on `delim` wherever it sits outside quotes and outside nested
/// brackets/braces. Segments are returned untrimmed.
pub fn split_top_level(text: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;

    while let Some(idx) = find_top_level(rest, |c| c == delim) {
        parts.push(&rest[..idx]);
        rest = &rest[idx + delim.len_utf8()..];
    }
    parts.push(rest);
    parts
}

/// Split `key = value` on the first unquoted `=`, trimming both sides.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let idx = find_unquoted(line, |c| c == '=')?;
    Some((line[..idx].trim(), line[idx + 1..].trim()))
}

/// True if `text` has an arithmetic operator outside quotes.
pub fn contains_operator(text: &str) -> bool {
    find_unquoted(text, is_operator_char).is_some()
}

/// Cut a line at the first `//` that is not inside quotes.
pub fn strip_line_comment(line: &str) -> &str {
    let mut tracker = QuoteTracker::new();
    let mut chars = line.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        let outside = tracker.step(ch);
        if outside && ch == '/' && matches!(chars.peek(), Some((_, '/'))) {
            return &line[..idx];
        }
    }
    line
}

/// Remove every `/* ... */` block. Quotes are not considered.
pub fn strip_block_comments(content: &str) -> String {
    BLOCK_COMMENT.replace_all(content, "").into_owned()
}

/// Strip block comments, then `//` comments line by line.
pub fn strip_comments(content: &str) -> Vec<String> {
    strip_block_comments(content)
        .split('\n')
        .map(|line| strip_line_comment(line).to_string())
        .collect()
}
