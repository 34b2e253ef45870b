// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;
use log::debug;

use crate::ast::{SectionPath, Value};
use crate::UclError;

/// The configuration being built. Also serves as the symbol table that
/// references resolve against while parsing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigTree {
    root: IndexMap<String, Value>,
}

/// Default values collected from the `[Defaults]` section, keyed by absolute
/// dotted path, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefaultsTable {
    entries: IndexMap<String, Value>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &IndexMap<String, Value> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Look up a value by path segments from the root.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        self.root.get(first.as_ref())?.get_path(rest)
    }

    /// Look up a value by dotted path, e.g. `Config.null_key`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments: Vec<&str> = path.split('.').collect();
        self.lookup(&segments)
    }

    /// Set `segments` to `value`, creating intermediate objects as needed.
    /// The last write to a slot wins.
    pub fn set_path<S: AsRef<str>>(&mut self, segments: &[S], value: Value) -> Result<(), UclError> {
        let Some((last, parents)) = segments.split_last() else {
            return Err(UclError::syntax("Cannot write a value at an empty path", 215));
        };

        let mut current = &mut self.root;
        for (depth, seg) in parents.iter().enumerate() {
            let slot = current
                .entry(seg.as_ref().to_string())
                .or_insert_with(|| Value::Object(IndexMap::new()));

            current = match slot {
                Value::Object(map) => map,
                other => {
                    let path: Vec<&str> = segments[..=depth].iter().map(|s| s.as_ref()).collect();
                    return Err(UclError::TypeError {
                        message: format!(
                            "Cannot create '{}' under '{}': it holds a {}, not an object",
                            last.as_ref(),
                            path.join("."),
                            other.type_name()
                        ),
                        hint: Some("A key and a section cannot share the same path".into()),
                        code: Some(410),
                    });
                }
            };
        }

        current.insert(last.as_ref().to_string(), value);
        Ok(())
    }
}

impl DefaultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a default. A repeated path keeps its first position and takes
    /// the newer value.
    pub fn insert(&mut self, path: impl Into<String>, value: Value) {
        self.entries.insert(path.into(), value);
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

/// Write `value` at `key` under the section path.
pub fn write_value(tree: &mut ConfigTree, section: &SectionPath, key: &str, value: Value) -> Result<(), UclError> {
    let mut full: Vec<&str> = section.segments().iter().map(String::as_str).collect();
    full.push(key);
    tree.set_path(&full, value)
}

/// Fill missing or null paths from the defaults table, in insertion order.
/// Existing non-null values are never replaced.
pub fn apply_defaults(tree: &mut ConfigTree, defaults: &DefaultsTable) -> Result<(), UclError> {
    for (path, default) in defaults.iter() {
        let segments: Vec<&str> = path.split('.').collect();
        let needs_default = match tree.lookup(&segments) {
            None => true,
            Some(Value::Null) => true,
            Some(_) => false,
        };

        if needs_default {
            debug!("applying default for '{}'", path);
            tree.set_path(&segments, default.clone())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(path: &str) -> SectionPath {
        SectionPath::parse(path)
    }

    #[test]
    fn test_write_creates_sections_and_merges() {
        let mut tree = ConfigTree::new();
        write_value(&mut tree, &section("Section"), "key1", Value::String("value1".into())).unwrap();
        write_value(&mut tree, &section("Section"), "key2", Value::String("original".into())).unwrap();
        write_value(&mut tree, &section("Section"), "key2", Value::String("redefined".into())).unwrap();
        write_value(&mut tree, &section("Section"), "key3", Value::String("value3".into())).unwrap();

        assert_eq!(tree.get("Section.key1"), Some(&Value::String("value1".into())));
        assert_eq!(tree.get("Section.key2"), Some(&Value::String("redefined".into())));
        assert_eq!(tree.get("Section.key3"), Some(&Value::String("value3".into())));
    }

    #[test]
    fn test_write_at_root() {
        let mut tree = ConfigTree::new();
        write_value(&mut tree, &SectionPath::root(), "top", Value::Int(1)).unwrap();
        assert_eq!(tree.get("top"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_write_under_scalar_is_type_error() {
        let mut tree = ConfigTree::new();
        write_value(&mut tree, &section("A"), "x", Value::Int(1)).unwrap();
        let err = write_value(&mut tree, &section("A.x"), "y", Value::Int(2)).unwrap_err();
        assert!(matches!(err, UclError::TypeError { .. }));
    }

    #[test]
    fn test_apply_defaults_rules() {
        let mut tree = ConfigTree::new();
        write_value(&mut tree, &section("Config"), "existing_key", Value::String("existing_value".into())).unwrap();
        write_value(&mut tree, &section("Config"), "null_key", Value::Null).unwrap();

        let mut defaults = DefaultsTable::new();
        defaults.insert("Config.existing_key", Value::String("default_value".into()));
        defaults.insert("Config.null_key", Value::String("default_for_null".into()));
        defaults.insert("Config.new_key", Value::String("new_default_value".into()));
        defaults.insert("NewSection.deep.new_key", Value::Int(7));

        apply_defaults(&mut tree, &defaults).unwrap();

        assert_eq!(tree.get("Config.existing_key"), Some(&Value::String("existing_value".into())));
        assert_eq!(tree.get("Config.null_key"), Some(&Value::String("default_for_null".into())));
        assert_eq!(tree.get("Config.new_key"), Some(&Value::String("new_default_value".into())));
        assert_eq!(tree.get("NewSection.deep.new_key"), Some(&Value::Int(7)));
    }

    #[test]
    fn test_apply_empty_defaults_is_identity() {
        let mut tree = ConfigTree::new();
        write_value(&mut tree, &section("A"), "b", Value::Null).unwrap();
        let before = tree.clone();
        apply_defaults(&mut tree, &DefaultsTable::new()).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_false_and_zero_are_not_replaced() {
        let mut tree = ConfigTree::new();
        write_value(&mut tree, &section("F"), "flag", Value::Bool(false)).unwrap();
        write_value(&mut tree, &section("F"), "count", Value::Int(0)).unwrap();

        let mut defaults = DefaultsTable::new();
        defaults.insert("F.flag", Value::Bool(true));
        defaults.insert("F.count", Value::Int(10));
        apply_defaults(&mut tree, &defaults).unwrap();

        assert_eq!(tree.get("F.flag"), Some(&Value::Bool(false)));
        assert_eq!(tree.get("F.count"), Some(&Value::Int(0)));
    }
}
