// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use log::debug;

use crate::ast::Value;
use crate::parser::Parser;
use crate::resolver::Environment;
use crate::tree::ConfigTree;
use crate::UclError;

mod access;
mod conversion;
mod helpers;

/// A parsed configuration with typed, dotted-path access.
pub struct UclConfig {
    root: Value,
    raw_content: String, // Store for error reporting
}

impl UclConfig {
    /// Load a UCL file. Includes resolve relative to the file's directory.
    ///
    /// # Example
    /// ```ignore
    /// let config = UclConfig::from_file("app.ucl")?;
    /// let port: u16 = config.get("Server.port")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, UclError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| UclError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        debug!("loading config from '{}'", path.display());
        let tree = Parser::new().parse_file(path)?;
        Ok(Self::from_parts(tree, content))
    }

    /// Load a UCL file with fallback support.
    ///
    /// Tries the primary path first. Only a file error moves on to the
    /// fallback; parse errors in the primary file are returned as-is.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, UclError> {
        match Self::from_file(&primary) {
            Ok(config) => Ok(config),
            Err(UclError::FileError { .. }) => {
                debug!("primary config '{}' unavailable, trying fallback", primary.as_ref().display());
                Self::from_file(&fallback).map_err(|e| match e {
                    UclError::FileError { message, .. } => UclError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(301),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Parse UCL text held in memory against the process environment.
    pub fn from_str(content: &str) -> Result<Self, UclError> {
        Self::from_str_with_env(content, Environment::capture())
    }

    /// Parse UCL text with a fixed environment.
    pub fn from_str_with_env(content: &str, env: Environment) -> Result<Self, UclError> {
        let tree = Parser::new().with_env(env).parse_str(content)?;
        Ok(Self::from_parts(tree, content.to_string()))
    }

    /// Wrap an already parsed tree. `raw_content` is only used to point
    /// type errors at the defining line.
    pub fn from_parts(tree: ConfigTree, raw_content: String) -> Self {
        Self {
            root: tree.into_value(),
            raw_content,
        }
    }

    /// The whole configuration as an object.
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }
}
