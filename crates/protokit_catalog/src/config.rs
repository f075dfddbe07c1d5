//! Project configuration (`protokit.yaml`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::loader::PrototypeLoader;

/// File name marking a protokit project root.
pub const CONFIG_FILE: &str = "protokit.yaml";

/// External variable the Jsonnet prelude reads component params from.
pub const DEFAULT_PARAMS_EXT_VAR: &str = "__protokit/params";

fn default_prototype_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("prototypes")]
}

fn default_components_dir() -> PathBuf {
    PathBuf::from("components")
}

fn default_params_ext_var() -> String {
    DEFAULT_PARAMS_EXT_VAR.to_string()
}

/// Settings read from `protokit.yaml`. Paths are relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default = "default_prototype_dirs")]
    pub prototype_dirs: Vec<PathBuf>,
    #[serde(default = "default_components_dir")]
    pub components_dir: PathBuf,
    #[serde(default = "default_params_ext_var")]
    pub params_ext_var: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            prototype_dirs: default_prototype_dirs(),
            components_dir: default_components_dir(),
            params_ext_var: default_params_ext_var(),
        }
    }
}

/// A project root together with its configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Open the project rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> CatalogResult<Self> {
        let root = root.into();
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Err(CatalogError::ConfigNotFound(root));
        }

        debug!("Reading project config from {:?}", path);
        let content = fs::read_to_string(&path)?;
        // An empty file is a valid config with all defaults.
        let config = if content.trim().is_empty() {
            ProjectConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(Self { root, config })
    }

    /// Find the nearest project containing `start`.
    pub fn discover(start: &Path) -> CatalogResult<Self> {
        start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
            .ok_or_else(|| CatalogError::ConfigNotFound(start.to_path_buf()))
            .and_then(|root| Self::open(root))
    }

    /// Write a default `protokit.yaml` into `root`.
    pub fn init(root: impl Into<PathBuf>) -> CatalogResult<Self> {
        let root = root.into();
        let config = ProjectConfig::default();
        fs::create_dir_all(&root)?;
        fs::write(root.join(CONFIG_FILE), serde_yaml::to_string(&config)?)?;
        Ok(Self { root, config })
    }

    pub fn prototype_dirs(&self) -> Vec<PathBuf> {
        self.config
            .prototype_dirs
            .iter()
            .map(|d| self.root.join(d))
            .collect()
    }

    pub fn components_dir(&self) -> PathBuf {
        self.root.join(&self.config.components_dir)
    }

    /// Loader over this project's prototype directories.
    pub fn loader(&self) -> PrototypeLoader {
        PrototypeLoader::new(self.prototype_dirs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discover_walks_up() {
        let temp = tempdir().unwrap();
        Project::init(temp.path()).unwrap();
        let nested = temp.path().join("components").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::discover(&nested).unwrap();
        assert_eq!(project.root, temp.path());
        assert_eq!(project.config, ProjectConfig::default());
        assert_eq!(project.components_dir(), temp.path().join("components"));
    }

    #[test]
    fn test_discover_without_config() {
        let temp = tempdir().unwrap();
        assert!(matches!(
            Project::discover(temp.path()),
            Err(CatalogError::ConfigNotFound(_))
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "prototype_dirs:\n  - vendor/prototypes\n  - prototypes\n",
        )
        .unwrap();
        let project = Project::open(temp.path()).unwrap();
        assert_eq!(project.prototype_dirs().len(), 2);
        assert_eq!(project.config.params_ext_var, DEFAULT_PARAMS_EXT_VAR);
    }

    #[test]
    fn test_empty_config_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "").unwrap();
        assert!(Project::open(temp.path()).is_ok());
    }
}
