use serde::de::DeserializeOwned;

use super::*;

impl UclConfig {
    /// Get a typed value from the configuration using dot notation.
    ///
    /// # Examples
    /// ```no_run
    /// # use ucl_cfg::UclConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = UclConfig::from_file("app.ucl")?;
    /// let host: String = config.get("Database.host")?;
    /// let port: u16 = config.get("Database.port")?;
    /// let debug: bool = config.get("Features.debug")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if path doesn't exist or value can't be converted to type T.
    pub fn get<T>(&self, path: &str) -> Result<T, UclError>
    where
        T: TryFrom<Value, Error = UclError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value).map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content))
    }

    /// Get an optional typed value - returns `None` if the path doesn't exist.
    ///
    /// # Examples
    /// ```no_run
    /// # use ucl_cfg::UclConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = UclConfig::from_file("app.ucl")?;
    /// if let Some(api_key) = config.get_optional::<String>("Api.key")? {
    ///     println!("API key: {}", api_key);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, UclError>
    where
        T: TryFrom<Value, Error = UclError>,
    {
        match self.lookup(path) {
            Some(value) => T::try_from(value.clone())
                .map(Some)
                .map_err(|e| enhance_error_with_line_info(e, path, &self.raw_content)),
            None => Ok(None),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use ucl_cfg::UclConfig;
    /// # let config = UclConfig::from_file("app.ucl").unwrap();
    /// let timeout = config.get_or("Server.timeout", 30u64);
    /// let debug = config.get_or("Features.debug", false);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = UclError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Get a raw `Value`. An empty path returns the root object.
    pub fn get_value(&self, path: &str) -> Result<Value, UclError> {
        self.lookup(path).cloned().ok_or_else(|| UclError::ReferenceError {
            message: format!("Path '{}' not found in configuration", path),
            hint: Some("Check that the path exists in your config file".into()),
            code: Some(501),
        })
    }

    /// Get all keys at a given path level, in document order.
    ///
    /// # Examples
    /// ```no_run
    /// # use ucl_cfg::UclConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = UclConfig::from_file("app.ucl")?;
    /// for key in config.get_keys("Database")? {
    ///     println!("Database.{}", key);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, UclError> {
        match self.get_value(path)? {
            Value::Object(items) => Ok(items.keys().cloned().collect()),
            other => Err(UclError::TypeError {
                message: format!("Path '{}' is a {}, not an object", path, other.type_name()),
                hint: Some("Only sections and object literals have keys".into()),
                code: Some(425),
            }),
        }
    }

    /// Check if a configuration path exists.
    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Deserialize the value at `path` into any serde type.
    ///
    /// # Examples
    /// ```ignore
    /// #[derive(serde::Deserialize)]
    /// struct Database { host: String, port: u16 }
    ///
    /// let db: Database = config.deserialize("Database")?;
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self, path: &str) -> Result<T, UclError> {
        let value = self.get_value(path)?;
        serde_json::from_value(serde_json::Value::from(&value)).map_err(|e| {
            enhance_error_with_line_info(
                UclError::TypeError {
                    message: format!("Cannot deserialize '{}': {}", path, e),
                    hint: None,
                    code: Some(426),
                },
                path,
                &self.raw_content,
            )
        })
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        if path.trim().is_empty() {
            return Some(&self.root);
        }
        let segments: Vec<&str> = path.split('.').collect();
        self.root.get_path(&segments)
    }
}

/// Enhance type errors with the line that defines `path`, when it can be found.
fn enhance_error_with_line_info(e: UclError, path: &str, raw_content: &str) -> UclError {
    match e {
        UclError::TypeError { message, hint, code } => {
            let (line, snippet) = helpers::find_config_line(path, raw_content);
            if line > 0 {
                UclError::TypeError {
                    message: format!("{} (line {})\n  → {}", message, line, snippet),
                    hint,
                    code,
                }
            } else {
                UclError::TypeError { message, hint, code }
            }
        }
        other => other,
    }
}
