//! Error types for the prototype catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading, searching or resolving prototypes.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// More than one prototype name ends with the query.
    #[error("Ambiguous match for '{query}':\n{}", .candidates.join("\n"))]
    AmbiguousMatch {
        query: String,
        candidates: Vec<String>,
    },

    /// No name ends with the query, but some contain it.
    #[error(
        "No prototype names matched '{query}'; a list of partial matches:\n{}",
        .candidates.join("\n")
    )]
    NoExactMatch {
        query: String,
        candidates: Vec<String>,
    },

    #[error("No prototype names matched '{query}'")]
    NoMatch { query: String },

    #[error("No prototypes found")]
    EmptyCatalog,

    #[error("Failed to find any search results for query '{query}'")]
    NoResults { query: String },

    #[error("Unknown template type '{0}' (expected one of: jsonnet, json, yaml)")]
    UnknownTemplateKind(String),

    #[error("Invalid prototype in {path}: {message}")]
    InvalidPrototype { path: PathBuf, message: String },

    #[error("No protokit.yaml found in {0} or any parent directory")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Candidate names attached to a resolution failure, if any.
    pub fn candidates(&self) -> &[String] {
        match self {
            CatalogError::AmbiguousMatch { candidates, .. }
            | CatalogError::NoExactMatch { candidates, .. } => candidates,
            _ => &[],
        }
    }

    /// Whether this error came out of name resolution or search.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::AmbiguousMatch { .. }
                | CatalogError::NoExactMatch { .. }
                | CatalogError::NoMatch { .. }
                | CatalogError::NoResults { .. }
                | CatalogError::EmptyCatalog
        )
    }
}
