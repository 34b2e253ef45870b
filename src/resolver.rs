// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Value;

static ENV_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$ENV\{([^}]+)\}").expect("valid env pattern"));

/// A read-only snapshot of environment variables, taken once per parse
/// session so lookups stay stable while the document is processed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment. Variables whose name or
    /// value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let vars = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// An environment with no variables set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Name of the variable if `text` starts with `$ENV{NAME}`.
///
/// Only the prefix has to match: anything after the closing brace is ignored.
pub fn match_env_reference(text: &str) -> Option<&str> {
    ENV_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Expand a `$ENV{NAME}` fragment. `None` if the fragment is not an env
/// reference; `Some(Value::Null)` if the variable is unset.
pub fn expand_env(text: &str, env: &Environment) -> Option<Value> {
    let name = match_env_reference(text)?;
    Some(
        env.get(name)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
    )
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;

    fn test_env() -> Environment {
        Environment::from_iter([
            ("UCL_APP_ENV", "production"),
            ("UCL_API_SECRET_KEY", "secret123"),
        ])
    }

    #[test]
    fn test_env_expansion() {
        let env = test_env();
        assert_eq!(
            expand_env("$ENV{UCL_APP_ENV}", &env),
            Some(Value::String("production".into()))
        );
        assert_eq!(
            expand_env("$ENV{UCL_API_SECRET_KEY}", &env),
            Some(Value::String("secret123".into()))
        );
    }

    #[test]
    fn test_env_missing_var_is_null() {
        assert_eq!(expand_env("$ENV{NONEXISTENT_VAR}", &test_env()), Some(Value::Null));
    }

    #[test]
    fn test_env_trailing_text_is_discarded() {
        assert_eq!(
            expand_env("$ENV{UCL_APP_ENV}-suffix", &test_env()),
            Some(Value::String("production".into()))
        );
    }

    #[test]
    fn test_env_requires_prefix_match() {
        assert_eq!(match_env_reference("prefix $ENV{UCL_APP_ENV}"), None);
        assert_eq!(match_env_reference("$ENV{}"), None);
        assert_eq!(match_env_reference("$env{UCL_APP_ENV}"), None);
        assert_eq!(match_env_reference("$ENV{HOME}"), Some("HOME"));
    }

    #[test]
    fn test_capture_sees_process_env() {
        unsafe {
            std::env::set_var("UCL_CAPTURE_TEST", "hello_world");
        }
        let env = Environment::capture();
        assert_eq!(env.get("UCL_CAPTURE_TEST"), Some("hello_world"));
    }
}
