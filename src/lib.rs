pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod tree;
pub mod utils;

pub use ast::{SectionPath, Value};
pub use config::UclConfig;
pub use error::UclError;
pub use parser::{parse_ucl_file, parse_ucl_string, resolve_value, Parser, Resolver};
pub use resolver::Environment;
pub use tree::{apply_defaults, write_value, ConfigTree, DefaultsTable};
