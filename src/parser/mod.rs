use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::{SectionPath, Value};
use crate::resolver::Environment;
use crate::tree::{ConfigTree, DefaultsTable};
use crate::UclError;

mod convert;
mod document;
mod expression;
mod include;
mod reference;
mod value;

pub use convert::{convert, TargetType};
pub use value::{is_simple_literal, is_variable_reference};

/// A parse session: owns the tree being built, the active section path, the
/// collected defaults and the environment snapshot.
///
/// Sessions are sequential; each `parse_*` call starts from an empty tree.
pub struct Parser {
    tree: ConfigTree,
    section: SectionPath,
    defaults: DefaultsTable,
    env: Environment,
    base_path: PathBuf,
}

/// Resolves right-hand-side text against a (partially built) tree.
///
/// Borrowed view over a session's state; see [`Resolver::resolve`] for the
/// order in which a fragment is classified.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    tree: &'a ConfigTree,
    section: &'a SectionPath,
    env: &'a Environment,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            tree: ConfigTree::new(),
            section: SectionPath::root(),
            defaults: DefaultsTable::new(),
            env: Environment::capture(),
            base_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Use a fixed environment instead of the process snapshot.
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Directory that relative `include` paths resolve against when parsing
    /// from a string.
    pub fn with_base_path<P: AsRef<Path>>(mut self, base_path: P) -> Self {
        self.base_path = base_path.as_ref().to_path_buf();
        self
    }

    /// Parse a document held in memory.
    pub fn parse_str(&mut self, content: &str) -> Result<ConfigTree, UclError> {
        self.run(content, Vec::new())
    }

    /// Parse a file. Its directory becomes the include base.
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ConfigTree, UclError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| UclError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        if let Some(parent) = path.parent() {
            self.base_path = parent.to_path_buf();
        }

        let origin = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.run(&content, vec![origin])
    }

    fn run(&mut self, content: &str, include_stack: Vec<PathBuf>) -> Result<ConfigTree, UclError> {
        self.tree = ConfigTree::new();
        self.section = SectionPath::root();
        self.defaults = DefaultsTable::new();

        document::parse_document(self, content, include_stack)?;
        Ok(self.tree.clone())
    }

    /// Resolve a fragment against the current session state.
    pub fn resolve_value(&self, raw_text: &str) -> Result<Value, UclError> {
        self.resolver().resolve(raw_text)
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn defaults(&self) -> &DefaultsTable {
        &self.defaults
    }

    pub fn section(&self) -> &SectionPath {
        &self.section
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub(crate) fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.tree, &self.section, &self.env)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Resolver<'a> {
    pub fn new(tree: &'a ConfigTree, section: &'a SectionPath, env: &'a Environment) -> Self {
        Self { tree, section, env }
    }
}

/// Resolve one right-hand-side fragment to a value.
pub fn resolve_value(
    raw_text: &str,
    tree: &ConfigTree,
    section: &SectionPath,
    env: &Environment,
) -> Result<Value, UclError> {
    Resolver::new(tree, section, env).resolve(raw_text)
}

/// Parse a document string with the process environment and the current
/// directory as include base.
pub fn parse_ucl_string(content: &str) -> Result<ConfigTree, UclError> {
    Parser::new().parse_str(content)
}

/// Parse a file with the process environment.
pub fn parse_ucl_file<P: AsRef<Path>>(path: P) -> Result<ConfigTree, UclError> {
    Parser::new().parse_file(path)
}
