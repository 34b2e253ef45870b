use crate::ast::SectionPath;
use crate::lexer::{split_key_value, strip_line_comment};

/// Find the line that defines `key` (a full dotted path) in the raw source.
///
/// Tracks `[section]` headers so `port = 80` under `[Server]` matches
/// `Server.port`. Keys after `[Defaults]` are already absolute. Returns the
/// 1-based line number and the trimmed line, or `(0, "<key not found>")`.
pub(super) fn find_config_line(key: &str, raw_content: &str) -> (usize, String) {
    let mut section = SectionPath::root();
    let mut in_defaults = false;
    let mut found = None;

    for (idx, line) in raw_content.lines().enumerate() {
        let trimmed = strip_line_comment(line).trim();

        if trimmed.is_empty() {
            continue;
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let name = name.trim();
            in_defaults = name.eq_ignore_ascii_case("defaults");
            if !in_defaults {
                section = SectionPath::parse(name);
            }
            continue;
        }

        let Some((line_key, _)) = split_key_value(trimmed) else {
            continue;
        };

        let full_path = if in_defaults || section.is_empty() {
            line_key.to_string()
        } else {
            format!("{}.{}", section, line_key)
        };

        // Last plain definition wins; a default only counts if nothing else defines the key.
        if full_path == key && (!in_defaults || found.is_none()) {
            found = Some((idx + 1, trimmed.to_string()));
        }
    }

    found.unwrap_or_else(|| (0, "<key not found>".into()))
}
