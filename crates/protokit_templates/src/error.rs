//! Error types for binding and expansion.

use std::path::PathBuf;
use thiserror::Error;

use protokit_catalog::{CatalogError, TemplateKind};

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Result type alias for evaluator calls.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors raised by template evaluators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("{entity}:{line}:{column}: {message}")]
    Syntax {
        entity: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Snippet references unbound variable '{0}'")]
    UnboundVariable(String),
}

/// Errors that can occur while binding parameters or expanding a prototype.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error(
        "Failed to instantiate prototype '{prototype}'. The following required parameters are missing:\n{}",
        .missing.iter().map(|m| format!("--{}", m)).collect::<Vec<_>>().join("\n")
    )]
    MissingRequiredParameters {
        prototype: String,
        missing: Vec<String>,
    },

    #[error("Prototype '{prototype}' has multiple parameters with name '{param}'")]
    DuplicateParameter { prototype: String, param: String },

    #[error("Invalid value '{value}' for parameter '{param}': {reason}")]
    InvalidParameterValue {
        param: String,
        value: String,
        reason: String,
    },

    #[error("Prototype '{prototype}' has no {kind} template")]
    UnsupportedRenderingKind {
        prototype: String,
        kind: TemplateKind,
    },

    #[error("Component already exists: {0}")]
    ComponentExists(PathBuf),

    #[error("Invalid component name '{0}'")]
    InvalidComponentName(String),

    #[error(transparent)]
    Evaluation(#[from] EvalError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TemplateError {
    /// Whether the error is about supplied or declared parameters.
    pub fn is_parameter_failure(&self) -> bool {
        matches!(
            self,
            TemplateError::MissingRequiredParameters { .. }
                | TemplateError::DuplicateParameter { .. }
                | TemplateError::InvalidParameterValue { .. }
        )
    }
}
