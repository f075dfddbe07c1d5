//! # protokit_catalog
//!
//! Prototype catalog for protokit.
//!
//! This crate owns the prototype model and everything needed to find one:
//!
//! - Parameter schemas and value quoting
//! - Prototype manifests and header-annotated Jsonnet prototypes
//! - The in-memory catalog index and its search modes
//! - Suffix-first name resolution
//! - Project configuration and prototype discovery
//!
//! ## Example
//!
//! ```rust,no_run
//! use protokit_catalog::{resolve, CatalogIndex, Project};
//! use std::path::Path;
//!
//! let project = Project::discover(Path::new(".")).unwrap();
//! let catalog = CatalogIndex::with_builtins(project.loader().load_all().unwrap());
//!
//! let proto = resolve("simple-deployment", &catalog).unwrap();
//! println!("{}", proto.name);
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod header;
pub mod index;
pub mod listing;
pub mod loader;
pub mod param;
pub mod prototype;
pub mod resolver;

pub use config::{Project, ProjectConfig, CONFIG_FILE, DEFAULT_PARAMS_EXT_VAR};
pub use error::{CatalogError, CatalogResult};
pub use header::parse_jsonnet_prototype;
pub use index::{CatalogIndex, SearchMode};
pub use listing::{describe, format_table, list, search, Description};
pub use loader::PrototypeLoader;
pub use param::{json_string, ParamSchema, ParamSchemas, ParamType, QuoteError};
pub use prototype::{Prototype, PrototypeTemplate, TemplateKind};
pub use resolver::resolve;
