// Author: Dustin Pilgrim
// License: MIT

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use super::*;
use crate::lexer::{contains_operator, split_top_level};
use crate::resolver::expand_env;
use crate::utils::unescape;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid identifier pattern"));
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").expect("valid line break pattern"));

impl<'a> Resolver<'a> {
    /// Turn a raw fragment into a value. The first matching rule wins:
    ///
    /// 1. `$ENV{NAME}` prefix: the variable's value, or null if unset.
    /// 2. `<base>.int|float|string|bool`: resolve `<base>`, then convert.
    /// 3. Unquoted arithmetic operator: expression.
    /// 4. Dotted path or bare identifier: reference.
    /// 5. Literal.
    ///
    /// Rules 2 to 4 never apply to simple literals. Empty text is null.
    pub fn resolve(&self, raw_text: &str) -> Result<Value, UclError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Ok(Value::Null);
        }

        if let Some(value) = expand_env(text, self.env) {
            trace!("'{}' -> environment lookup", text);
            return Ok(value);
        }

        let simple = is_simple_literal(text);

        if !simple {
            if let Some((base, suffix)) = text.rsplit_once('.') {
                if let Ok(target) = suffix.parse::<TargetType>() {
                    trace!("'{}' -> {} conversion", text, target.as_str());
                    let base_value = self.resolve(base)?;
                    return convert(&base_value, target);
                }
            }

            if contains_operator(text) {
                trace!("'{}' -> expression", text);
                return self.evaluate_expression(text);
            }

            if is_variable_reference(text) {
                trace!("'{}' -> reference", text);
                return self.resolve_reference(text);
            }
        }

        self.decode_literal(text)
    }

    /// Decode a literal. Bare words that are not numbers become strings.
    pub fn decode_literal(&self, text: &str) -> Result<Value, UclError> {
        let text = text.trim();

        match text.to_ascii_lowercase().as_str() {
            "null" => return Ok(Value::Null),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }

        if let Some(inner) = strip_quotes(text) {
            return Ok(Value::String(unescape(inner)));
        }

        if text.starts_with('[') && text.ends_with(']') {
            return self.decode_array(text).map(Value::Array);
        }

        if text.starts_with('{') && text.ends_with('}') {
            return decode_object(text);
        }

        Ok(decode_number(text).unwrap_or_else(|| Value::String(text.to_string())))
    }

    /// Decode `[a, b, ...]`. Each element goes through the full pipeline, so
    /// elements may be expressions, references or env lookups.
    pub fn decode_array(&self, text: &str) -> Result<Vec<Value>, UclError> {
        let inner = text
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(text)
            .trim();
        if inner.is_empty() {
            return Ok(Vec::new());
        }

        let flattened = LINE_BREAK.replace_all(inner, " ");
        split_top_level(&flattened, ',')
            .into_iter()
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .map(|element| self.resolve(element))
            .collect()
    }
}

/// True if the fragment describes itself: a quoted string with no unquoted
/// operator, a bracketed or braced block, `true`/`false`/`null` in any case,
/// or a number.
pub fn is_simple_literal(text: &str) -> bool {
    let text = text.trim();

    if strip_quotes(text).is_some() && !contains_operator(text) {
        return true;
    }

    if (text.starts_with('[') && text.ends_with(']')) || (text.starts_with('{') && text.ends_with('}')) {
        return true;
    }

    if matches!(text.to_ascii_lowercase().as_str(), "true" | "false" | "null") {
        return true;
    }

    text.parse::<f64>().is_ok()
}

/// True if the fragment should be looked up in the tree: not a simple
/// literal, and either dotted or a bare identifier.
pub fn is_variable_reference(text: &str) -> bool {
    !is_simple_literal(text) && (text.contains('.') || IDENTIFIER.is_match(text))
}

fn strip_quotes(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    let quoted = (text.starts_with('"') && text.ends_with('"')) || (text.starts_with('\'') && text.ends_with('\''));
    quoted.then(|| &text[1..text.len() - 1])
}

fn decode_object(text: &str) -> Result<Value, UclError> {
    serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from)
        .map_err(|e| UclError::SyntaxError {
            message: format!("Invalid JSON object: {} in '{}'", e, text),
            hint: Some("Object literals must be standard JSON: double-quoted keys, no trailing commas".into()),
            code: Some(206),
        })
}

/// Integer unless the text has `.`, `e` or `E`; integers too large for i64
/// fall back to float.
fn decode_number(text: &str) -> Option<Value> {
    if text.contains(['.', 'e', 'E']) {
        return text.parse::<f64>().ok().map(Value::Float);
    }

    match text.parse::<i64>() {
        Ok(i) => Some(Value::Int(i)),
        Err(_) if is_integer_text(text) => text.parse::<f64>().ok().map(Value::Float),
        Err(_) => None,
    }
}

fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
