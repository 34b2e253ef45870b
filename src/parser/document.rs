use std::path::PathBuf;

use log::debug;

use super::*;
use crate::lexer::{split_key_value, strip_comments};
use crate::tree::{apply_defaults, write_value};

pub(super) fn parse_document(parser: &mut Parser, content: &str, mut include_stack: Vec<PathBuf>) -> Result<(), UclError> {
    let lines = include::expand_includes(strip_comments(content), &parser.base_path, &mut include_stack)?;
    debug!("parsing {} lines", lines.len());

    parse_lines(parser, &lines)?;

    if !parser.defaults.is_empty() {
        debug!("applying {} defaults", parser.defaults.len());
    }
    apply_defaults(&mut parser.tree, &parser.defaults)
}

fn parse_lines(parser: &mut Parser, lines: &[String]) -> Result<(), UclError> {
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx].trim();

        if line.is_empty() {
            idx += 1;
            continue;
        }

        if let Some(name) = section_header(line) {
            if name.eq_ignore_ascii_case("defaults") {
                debug!("entering [Defaults] with section [{}] frozen", parser.section);
                return parse_defaults(parser, lines, idx + 1);
            }
            parser.section = SectionPath::parse(name);
            debug!("section [{}]", parser.section);
            idx += 1;
            continue;
        }

        idx = parse_statement(parser, lines, idx)?;
    }

    Ok(())
}

/// Parse the statement at `idx` and return the index of the next line.
fn parse_statement(parser: &mut Parser, lines: &[String], idx: usize) -> Result<usize, UclError> {
    let line = lines[idx].trim();

    if !line.contains('=') {
        if is_fragment(line) {
            return Ok(idx + 1);
        }
        return Err(UclError::SyntaxError {
            message: format!("Invalid syntax: line without equals sign: {}", line),
            hint: Some("Statements take the form key = value".into()),
            code: Some(201),
        });
    }

    let (key, value_text) = split_statement(line)?;
    let (value_text, end) = capture_block(lines, idx, value_text);

    let value = parser.resolver().resolve(&value_text)?;
    write_value(&mut parser.tree, &parser.section, key, value)?;

    Ok(end + 1)
}

/// Everything after `[Defaults]` is `path = value` with absolute paths. The
/// active section stays whatever it was, so relative references still see it.
fn parse_defaults(parser: &mut Parser, lines: &[String], start: usize) -> Result<(), UclError> {
    let mut idx = start;

    while idx < lines.len() {
        let line = lines[idx].trim();

        if line.is_empty() || (!line.contains('=') && section_header(line).is_none()) {
            idx += 1;
            continue;
        }

        if section_header(line).is_some() {
            return Err(UclError::SyntaxError {
                message: format!("Section header after [Defaults]: {}", line),
                hint: Some("The [Defaults] section must be the last section in the file".into()),
                code: Some(204),
            });
        }

        let (path, value_text) = split_statement(line)?;
        let (value_text, end) = capture_block(lines, idx, value_text);

        let value = parser.resolver().resolve(&value_text)?;
        debug!("default '{}' = {}", path, value);
        parser.defaults.insert(path, value);

        idx = end + 1;
    }

    Ok(())
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

fn split_statement(line: &str) -> Result<(&str, &str), UclError> {
    let (key, value) = split_key_value(line).ok_or_else(|| {
        UclError::syntax(format!("Invalid key-value syntax: {}", line), 202)
            .with_hint("The '=' must not be inside quotes")
    })?;

    if key.is_empty() {
        return Err(UclError::syntax(format!("Missing key before '=': {}", line), 203));
    }
    Ok((key, value))
}

/// Lines without `=` that are leftovers of a multi-line value or stray
/// punctuation. These are skipped rather than rejected.
fn is_fragment(line: &str) -> bool {
    line.starts_with('[')
        || line.ends_with(']')
        || line == "{"
        || line == "}"
        || line.contains(['[', ']', '{', '}', ',', '"', '\''])
}

/// If `initial` opens a `{` or `[` block, keep appending non-blank lines
/// until the opener is balanced. Returns the joined text and the index of the
/// last consumed line. Quotes are not considered when counting.
fn capture_block(lines: &[String], start: usize, initial: &str) -> (String, usize) {
    let (open, close) = match initial.chars().next() {
        Some('{') => ('{', '}'),
        Some('[') => ('[', ']'),
        _ => return (initial.to_string(), start),
    };

    let balance = |text: &str| {
        text.chars().filter(|&c| c == open).count() as i64 - text.chars().filter(|&c| c == close).count() as i64
    };

    let mut text = initial.to_string();
    let mut depth = balance(initial);
    let mut idx = start + 1;

    while idx < lines.len() && depth > 0 {
        let line = lines[idx].trim();
        if !line.is_empty() {
            text.push('\n');
            text.push_str(line);
            depth += balance(line);
        }
        idx += 1;
    }

    (text, idx - 1)
}
