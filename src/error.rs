use thiserror::Error;

/// The error type for UCL parsing, resolution and typed access.
///
/// Every failure is reported as one of four kinds. Codes are grouped by kind:
/// 2xx syntax, 3xx file, 4xx type, 5xx reference.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UclError {
    /// Malformed statement, unbalanced parentheses or brackets, invalid
    /// object literal, or a section header after `[Defaults]`.
    #[error("[UCL] Syntax Error: {message}{}", details(.hint, .code))]
    SyntaxError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A dotted or indexed path that does not resolve against the tree.
    #[error("[UCL] Reference Error: {message}{}", details(.hint, .code))]
    ReferenceError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Failed explicit conversion, non-numeric arithmetic operand, or
    /// division/modulo by zero.
    #[error("[UCL] Type Error: {message}{}", details(.hint, .code))]
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a config or included file cannot be read.
    #[error("[UCL] File Error '{path}': {message}{}", details(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

fn details(hint: &Option<String>, code: &Option<u32>) -> String {
    let mut out = String::new();
    if let Some(h) = hint {
        out.push_str(&format!(" Hint: {}", h));
    }
    if let Some(c) = code {
        out.push_str(&format!(" Code: {}", c));
    }
    out
}

impl UclError {
    pub(crate) fn syntax(message: impl Into<String>, code: u32) -> Self {
        UclError::SyntaxError {
            message: message.into(),
            hint: None,
            code: Some(code),
        }
    }

    pub(crate) fn reference(message: impl Into<String>, code: u32) -> Self {
        UclError::ReferenceError {
            message: message.into(),
            hint: None,
            code: Some(code),
        }
    }

    pub(crate) fn type_error(message: impl Into<String>, code: u32) -> Self {
        UclError::TypeError {
            message: message.into(),
            hint: None,
            code: Some(code),
        }
    }

    /// Helper for file-related errors when loading configs or includes.
    pub(crate) fn file_error(message: impl Into<String>, path: impl Into<String>, code: u32) -> Self {
        UclError::FileError {
            message: message.into(),
            path: path.into(),
            hint: Some("Check file path and permissions".into()),
            code: Some(code),
        }
    }

    /// Attach a hint, replacing any existing one.
    pub fn with_hint(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            UclError::SyntaxError { hint, .. }
            | UclError::ReferenceError { hint, .. }
            | UclError::TypeError { hint, .. }
            | UclError::FileError { hint, .. } => *hint = Some(text.into()),
        }
        self
    }

    /// Short name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            UclError::SyntaxError { .. } => "syntax",
            UclError::ReferenceError { .. } => "reference",
            UclError::TypeError { .. } => "type",
            UclError::FileError { .. } => "file",
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            UclError::SyntaxError { code, .. }
            | UclError::ReferenceError { code, .. }
            | UclError::TypeError { code, .. }
            | UclError::FileError { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            UclError::SyntaxError { message, .. }
            | UclError::ReferenceError { message, .. }
            | UclError::TypeError { message, .. }
            | UclError::FileError { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_hint_and_code() {
        let err = UclError::syntax("Mismatched parentheses in expression: (1 + 2", 207)
            .with_hint("Close every '(' with ')'");
        let text = err.to_string();
        assert!(text.starts_with("[UCL] Syntax Error: Mismatched parentheses"));
        assert!(text.contains("Hint: Close every '(' with ')'"));
        assert!(text.ends_with("Code: 207"));
    }

    #[test]
    fn test_kind_and_code() {
        let err = UclError::reference("Cannot resolve reference: a.b", 501);
        assert_eq!(err.kind(), "reference");
        assert_eq!(err.code(), Some(501));
        assert_eq!(err.message(), "Cannot resolve reference: a.b");

        let err = UclError::file_error("Include file not found", "sub.ucl", 302);
        assert_eq!(err.kind(), "file");
        assert!(err.to_string().contains("'sub.ucl'"));
    }
}
