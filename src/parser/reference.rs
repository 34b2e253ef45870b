// Author: Dustin Pilgrim
// License: MIT

use log::trace;

use super::*;

impl<'a> Resolver<'a> {
    /// Resolve a dotted path, optionally followed by `[index]` or `["key"]`
    /// accessors. Only values already written to the tree are visible.
    pub fn resolve_reference(&self, text: &str) -> Result<Value, UclError> {
        if text.contains('[') && text.contains(']') {
            return self.resolve_indexed(text);
        }
        self.lookup_path(text).cloned()
    }

    /// Absolute lookup first, then relative to the active section.
    fn lookup_path(&self, path: &str) -> Result<&'a Value, UclError> {
        let parts: Vec<&str> = path.split('.').collect();
        if let Some(value) = self.tree.lookup(&parts) {
            return Ok(value);
        }

        if !self.section.is_empty() {
            let mut relative: Vec<&str> = self.section.segments().iter().map(String::as_str).collect();
            relative.extend(&parts);
            if let Some(value) = self.tree.lookup(&relative) {
                trace!("'{}' resolved relative to [{}]", path, self.section);
                return Ok(value);
            }
        }

        Err(UclError::ReferenceError {
            message: format!("Cannot resolve reference: {}", path),
            hint: Some("References can only see keys defined earlier in the document".into()),
            code: Some(501),
        })
    }

    fn resolve_indexed(&self, text: &str) -> Result<Value, UclError> {
        let (base, accessors) = split_accessors(text)?;
        let mut current = self.lookup_path(&base)?;
        for accessor in &accessors {
            current = step(current, accessor, text)?;
        }
        Ok(current.clone())
    }
}

/// Split `a.b[0]["k"]` into the base path and the raw accessor texts.
fn split_accessors(text: &str) -> Result<(String, Vec<String>), UclError> {
    let mut base = String::new();
    let mut accessors = Vec::new();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '[' {
            base.push(ch);
            continue;
        }

        let mut depth = 1;
        let mut accessor = String::new();
        for inner in chars.by_ref() {
            match inner {
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                break;
            }
            accessor.push(inner);
        }

        if depth != 0 {
            return Err(UclError::syntax(format!("Mismatched brackets in reference: {}", text), 212)
                .with_hint("Close every '[' with ']'"));
        }
        accessors.push(accessor);
    }

    Ok((base, accessors))
}

fn step<'v>(current: &'v Value, accessor: &str, text: &str) -> Result<&'v Value, UclError> {
    if !accessor.is_empty() && accessor.chars().all(|c| c.is_ascii_digit()) {
        let items = current.as_array().ok_or_else(|| {
            UclError::reference(
                format!("Cannot index a {} with [{}] in {}", current.type_name(), accessor, text),
                503,
            )
        })?;
        let index = accessor.parse::<usize>().unwrap_or(usize::MAX);
        return items.get(index).ok_or_else(|| {
            UclError::reference(
                format!("Array index out of bounds: {} (length {}) in {}", accessor, items.len(), text),
                502,
            )
        });
    }

    let key = accessor.trim_matches(|c| c == '"' || c == '\'');
    let map = current.as_object().ok_or_else(|| {
        UclError::reference(
            format!("Cannot read key '{}' from a {} in {}", key, current.type_name(), text),
            504,
        )
    })?;
    map.get(key)
        .ok_or_else(|| UclError::reference(format!("Object key not found: '{}' in {}", key, text), 505))
}
