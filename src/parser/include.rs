use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexer::strip_comments;
use crate::UclError;

static INCLUDE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^include\s+["']([^"']+)["']"#).expect("valid include pattern"));

/// Replace every `include "path"` line with the comment-stripped lines of the
/// named file, recursively. Nested includes resolve against the directory of
/// the file that names them. `stack` holds the files currently being
/// expanded.
pub(super) fn expand_includes(
    lines: Vec<String>,
    base_dir: &Path,
    stack: &mut Vec<PathBuf>,
) -> Result<Vec<String>, UclError> {
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.trim();
        if !line.starts_with("include ") {
            out.push(line.to_string());
            continue;
        }

        let raw_path = INCLUDE_PATTERN
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                UclError::syntax(format!("Invalid include syntax: {}", line), 213)
                    .with_hint("Use include \"path/to/file.ucl\"")
            })?;

        let path = include_path(raw_path, base_dir)?;
        if !path.is_file() {
            return Err(UclError::file_error(
                format!("Include file not found: {}", raw_path),
                path.display().to_string(),
                302,
            ));
        }

        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if stack.contains(&key) {
            return Err(UclError::FileError {
                message: format!("Circular include of '{}'", raw_path),
                path: path.display().to_string(),
                hint: Some("A file cannot include itself, directly or through other includes".into()),
                code: Some(303),
            });
        }

        debug!("including '{}'", path.display());
        let content = fs::read_to_string(&path).map_err(|e| {
            UclError::file_error(format!("Failed to read include file: {}", e), path.display().to_string(), 304)
        })?;

        let nested_base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| base_dir.to_path_buf());
        stack.push(key);
        let nested = expand_includes(strip_comments(&content), &nested_base, stack)?;
        stack.pop();
        out.extend(nested);
    }

    Ok(out)
}

fn include_path(raw_path: &str, base_dir: &Path) -> Result<PathBuf, UclError> {
    let path = match raw_path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .ok_or_else(|| UclError::FileError {
                message: "Cannot expand '~': home directory is unknown".into(),
                path: raw_path.into(),
                hint: Some("Use an absolute path in the include".into()),
                code: Some(305),
            })?
            .join(rest),
        None => PathBuf::from(raw_path),
    };

    Ok(if path.is_relative() { base_dir.join(path) } else { path })
}
