//! Prototype definitions.
//!
//! A prototype is a named, parameterized template. Its template bodies are
//! keyed by [`TemplateKind`]; the parameter list is split into required and
//! optional views on demand rather than stored twice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::param::{ParamSchema, ParamSchemas};

/// Output dialect a template body is written in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    Jsonnet,
    Json,
    Yaml,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Jsonnet => "jsonnet",
            TemplateKind::Json => "json",
            TemplateKind::Yaml => "yaml",
        }
    }

    /// File extension used when a component of this kind is written out.
    pub fn extension(&self) -> &'static str {
        match self {
            TemplateKind::Jsonnet => "jsonnet",
            TemplateKind::Json => "json",
            TemplateKind::Yaml => "yaml",
        }
    }

    /// Structured bodies go through the Jsonnet evaluator; the rest are snippets.
    pub fn is_structured(&self) -> bool {
        matches!(self, TemplateKind::Jsonnet)
    }

    pub fn all() -> [TemplateKind; 3] {
        [TemplateKind::Jsonnet, TemplateKind::Json, TemplateKind::Yaml]
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jsonnet" => Ok(TemplateKind::Jsonnet),
            "json" => Ok(TemplateKind::Json),
            "yaml" | "yml" => Ok(TemplateKind::Yaml),
            _ => Err(CatalogError::UnknownTemplateKind(s.to_string())),
        }
    }
}

/// Template bodies and descriptive text of a prototype.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PrototypeTemplate {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub jsonnet_body: Option<Vec<String>>,
    #[serde(default)]
    pub json_body: Option<Vec<String>>,
    #[serde(default)]
    pub yaml_body: Option<Vec<String>>,
}

impl PrototypeTemplate {
    /// Body lines for a kind, if the prototype defines one.
    pub fn body(&self, kind: TemplateKind) -> Option<&[String]> {
        match kind {
            TemplateKind::Jsonnet => self.jsonnet_body.as_deref(),
            TemplateKind::Json => self.json_body.as_deref(),
            TemplateKind::Yaml => self.yaml_body.as_deref(),
        }
    }

    pub fn available_kinds(&self) -> Vec<TemplateKind> {
        TemplateKind::all()
            .into_iter()
            .filter(|kind| self.body(*kind).is_some())
            .collect()
    }
}

fn default_api_version() -> String {
    "0.0.1".to_string()
}

/// A named template entity in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prototype {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Fully-qualified dotted name
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamSchema>,
    pub template: PrototypeTemplate,
}

impl Prototype {
    pub fn new(name: impl Into<String>, template: PrototypeTemplate) -> Self {
        Self {
            api_version: default_api_version(),
            name: name.into(),
            params: Vec::new(),
            template,
        }
    }

    pub fn with_param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    pub fn description(&self) -> &str {
        &self.template.description
    }

    /// One-line description used in listings.
    pub fn short_description(&self) -> &str {
        match &self.template.short_description {
            Some(short) if !short.is_empty() => short,
            _ => self.template.description.lines().next().unwrap_or(""),
        }
    }

    /// Parameters without a default, in declaration order.
    pub fn required_params(&self) -> ParamSchemas {
        self.params
            .iter()
            .filter(|p| p.is_required())
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }

    /// Parameters with a default, in declaration order.
    pub fn optional_params(&self) -> ParamSchemas {
        self.params
            .iter()
            .filter(|p| !p.is_required())
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }

    /// Body lines for `kind`, if defined.
    pub fn body(&self, kind: TemplateKind) -> Option<&[String]> {
        self.template.body(kind)
    }

    pub fn available_kinds(&self) -> Vec<TemplateKind> {
        self.template.available_kinds()
    }

    /// Structural checks performed when a prototype is loaded.
    ///
    /// Duplicate parameter names are left alone here; binding reports them.
    pub fn validate(&self) -> CatalogResult<()> {
        let problem = if self.name.trim().is_empty() {
            Some("prototype name is empty".to_string())
        } else if let Some(p) = self.params.iter().find(|p| p.name.trim().is_empty()) {
            Some(format!("parameter with empty name (description: '{}')", p.description))
        } else if self.available_kinds().is_empty() {
            Some("prototype defines no template body".to_string())
        } else {
            None
        };

        match problem {
            Some(message) => Err(CatalogError::InvalidPrototype {
                path: self.name.clone().into(),
                message,
            }),
            None => Ok(()),
        }
    }
}
