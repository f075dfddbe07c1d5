//! # protokit_templates
//!
//! Parameter binding and template expansion for protokit.
//!
//! Given a resolved prototype, this crate binds raw parameter values
//! against its schema, expands the requested template body through the
//! structured or snippet evaluator, and optionally writes the result into a
//! project's components directory.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use protokit_catalog::{CatalogIndex, TemplateKind};
//! use protokit_templates::{resolve_and_expand, TemplateExpander};
//!
//! let catalog = CatalogIndex::with_builtins(Vec::new());
//! let mut values = HashMap::new();
//! values.insert("name".to_string(), "nginx".to_string());
//! values.insert("image".to_string(), "nginx:1.25".to_string());
//!
//! let expansion = resolve_and_expand(
//!     "simple-deployment",
//!     TemplateKind::Yaml,
//!     &values,
//!     "nginx",
//!     &catalog,
//!     &TemplateExpander::default(),
//! )
//! .unwrap();
//! println!("{}", expansion.text);
//! ```

pub mod binder;
pub mod component;
pub mod error;
pub mod evaluator;
pub mod expander;
pub mod jsonnet;
pub mod pipeline;
pub mod snippet;

pub use binder::{bind, BoundParams};
pub use component::{ComponentParams, ComponentWriter, PARAMS_FILE};
pub use error::{EvalError, EvalResult, TemplateError, TemplateResult};
pub use evaluator::{BuiltinJsonnet, BuiltinSnippet, SnippetEvaluator, StructuredEvaluator};
pub use expander::TemplateExpander;
pub use jsonnet::JsonnetSource;
pub use pipeline::{resolve_and_expand, Expansion};
pub use snippet::SnippetTemplate;
