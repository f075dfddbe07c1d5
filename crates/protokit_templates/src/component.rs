//! Writing expanded prototypes into a project's components directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, info, warn};

use protokit_catalog::TemplateKind;

use crate::binder::BoundParams;
use crate::error::{TemplateError, TemplateResult};

/// File in the components directory holding every component's params.
pub const PARAMS_FILE: &str = "params.yaml";

/// Contents of `params.yaml`: component name → param name → typed value.
///
/// Values are the bound literals read back as data, so a string param is
/// stored as a YAML string and a number param as a YAML number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ComponentParams {
    #[serde(default)]
    pub components: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Persists components and their params.
pub struct ComponentWriter {
    components_dir: PathBuf,
    overwrite: bool,
}

impl ComponentWriter {
    pub fn new(components_dir: impl Into<PathBuf>) -> Self {
        Self {
            components_dir: components_dir.into(),
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn components_dir(&self) -> &Path {
        &self.components_dir
    }

    /// Path of the file a component of `kind` is written to.
    pub fn component_path(&self, name: &str, kind: TemplateKind) -> PathBuf {
        self.components_dir
            .join(format!("{}.{}", name, kind.extension()))
    }

    /// Write component `name` and record its params.
    ///
    /// Fails if a file for `name` already exists under any template kind,
    /// unless the writer was built with `overwrite(true)`, in which case
    /// files of the other kinds are removed. Nothing is written when the
    /// existing params file cannot be read.
    pub fn create(
        &self,
        name: &str,
        text: &str,
        params: &BoundParams,
        kind: TemplateKind,
    ) -> TemplateResult<PathBuf> {
        validate_component_name(name)?;

        let existing: Vec<PathBuf> = TemplateKind::all()
            .into_iter()
            .map(|k| self.component_path(name, k))
            .filter(|p| p.exists())
            .collect();
        if !self.overwrite {
            if let Some(first) = existing.first() {
                return Err(TemplateError::ComponentExists(first.clone()));
            }
        }

        let mut all = self.read_params()?;
        all.components.insert(name.to_string(), typed_params(params));
        let params_yaml = serde_yaml::to_string(&all)?;

        let path = self.component_path(name, kind);
        let mut content = text.to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }

        fs::create_dir_all(&self.components_dir)?;
        if self.overwrite {
            for stale in existing.iter().filter(|p| **p != path) {
                debug!("Removing {:?} replaced by {:?}", stale, path);
                fs::remove_file(stale)?;
            }
        }
        fs::write(&path, content)?;
        info!("Wrote component {:?}", path);

        let params_path = self.components_dir.join(PARAMS_FILE);
        debug!("Recording params for {} in {:?}", name, params_path);
        if let Err(e) = fs::write(&params_path, params_yaml) {
            let _ = fs::remove_file(&path);
            return Err(e.into());
        }
        Ok(path)
    }

    /// Read `params.yaml`, or an empty set if it does not exist yet.
    pub fn read_params(&self) -> TemplateResult<ComponentParams> {
        let path = self.components_dir.join(PARAMS_FILE);
        if !path.exists() {
            return Ok(ComponentParams::default());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(ComponentParams::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Bound literals as data. String literals are JSON-quoted and numbers,
/// arrays and objects are flow YAML, so each parses as a YAML scalar or
/// collection of the declared type.
fn typed_params(params: &BoundParams) -> BTreeMap<String, Value> {
    params
        .iter()
        .map(|(name, literal)| {
            let value = serde_yaml::from_str::<Value>(literal).unwrap_or_else(|e| {
                warn!("Recording '{}' as text, not valid YAML: {}", name, e);
                Value::String(literal.to_string())
            });
            (name.to_string(), value)
        })
        .collect()
}

fn validate_component_name(name: &str) -> TemplateResult<()> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if invalid {
        return Err(TemplateError::InvalidComponentName(name.to_string()));
    }
    Ok(())
}
