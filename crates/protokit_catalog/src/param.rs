//! Parameter schemas declared by prototypes.
//!
//! A parameter with a default value is optional; one without is required.
//! Values supplied for a parameter are quoted according to its [`ParamType`]
//! so they can be embedded directly into a template body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type hint driving how a parameter value is quoted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ParamType {
    Number,
    #[default]
    String,
    NumberOrString,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::NumberOrString => "number-or-string",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(ParamType::Number),
            "string" => Ok(ParamType::String),
            "number-or-string" | "numberOrString" => Ok(ParamType::NumberOrString),
            "array" => Ok(ParamType::Array),
            "object" => Ok(ParamType::Object),
            other => Err(format!(
                "unknown parameter type '{}' (expected one of: number, string, number-or-string, array, object)",
                other
            )),
        }
    }
}

/// Reason a raw value could not be represented for a parameter type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct QuoteError {
    pub reason: String,
}

impl QuoteError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Declared parameter of a prototype.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParamSchema {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: ParamType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: None,
            param_type,
        }
    }

    /// Create an optional parameter with a default value.
    pub fn optional(
        name: impl Into<String>,
        param_type: ParamType,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: Some(default.into()),
            param_type,
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Quote a raw value for embedding into a template body.
    pub fn quote(&self, value: &str) -> Result<String, QuoteError> {
        match self.param_type {
            ParamType::String => quote_string(value),
            ParamType::Number => quote_number(value),
            ParamType::NumberOrString => {
                quote_number(value).or_else(|_| quote_string(value))
            }
            ParamType::Array => quote_delimited(value, '[', ']', "array"),
            ParamType::Object => quote_delimited(value, '{', '}', "object"),
        }
    }
}

/// `value` as a double-quoted, escaped string literal.
pub fn json_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn quote_string(value: &str) -> Result<String, QuoteError> {
    Ok(json_string(value))
}

/// Accepts JSON number literals only, which Jsonnet and YAML read the same way.
fn quote_number(value: &str) -> Result<String, QuoteError> {
    let trimmed = value.trim();
    match serde_json::from_str::<serde_json::Number>(trimmed) {
        Ok(n) if n.as_f64().is_some_and(f64::is_finite) => Ok(trimmed.to_string()),
        _ => Err(QuoteError::new(format!("'{}' is not a number", value))),
    }
}

fn quote_delimited(value: &str, open: char, close: char, kind: &str) -> Result<String, QuoteError> {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with(open) && trimmed.ends_with(close) {
        Ok(trimmed.to_string())
    } else {
        Err(QuoteError::new(format!(
            "'{}' is not an {} literal (expected {}...{})",
            value, kind, open, close
        )))
    }
}

/// Ordered list of parameter schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSchemas(Vec<ParamSchema>);

impl ParamSchemas {
    pub fn new(params: Vec<ParamSchema>) -> Self {
        Self(params)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParamSchema> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|p| p.name.as_str()).collect()
    }

    /// Render one aligned line per parameter, each starting with `prefix`.
    ///
    /// ```text
    /// --name  Name of the deployment [type: string]
    /// --port  Port to expose [default: 80, type: number]
    /// ```
    pub fn pretty_string(&self, prefix: &str) -> String {
        if self.0.is_empty() {
            return format!("{}[none]", prefix);
        }

        let flags: Vec<String> = self.0.iter().map(|p| format!("--{}", p.name)).collect();
        let width = flags.iter().map(|f| f.len()).max().unwrap_or(0);

        self.0
            .iter()
            .zip(&flags)
            .map(|(param, flag)| {
                let hint = match &param.default {
                    Some(default) => {
                        format!("[default: {}, type: {}]", default, param.param_type)
                    }
                    None => format!("[type: {}]", param.param_type),
                };
                let description = if param.description.is_empty() {
                    hint
                } else {
                    format!("{} {}", param.description, hint)
                };
                format!("{}{:<width$} {}", prefix, flag, description, width = width)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<ParamSchema>> for ParamSchemas {
    fn from(params: Vec<ParamSchema>) -> Self {
        Self(params)
    }
}

impl<'a> IntoIterator for &'a ParamSchemas {
    type Item = &'a ParamSchema;
    type IntoIter = std::slice::Iter<'a, ParamSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
