//! Prototype loading from project directories.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{CatalogError, CatalogResult};
use crate::header::parse_jsonnet_prototype;
use crate::prototype::Prototype;

/// Loads prototype files from one or more directories.
///
/// `*.yaml`, `*.yml` and `*.json` files are prototype manifests; `*.jsonnet`
/// files carry their metadata in a comment header. Files are visited in
/// path order so the resulting catalog order is stable.
pub struct PrototypeLoader {
    dirs: Vec<PathBuf>,
}

impl PrototypeLoader {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn single(dir: impl Into<PathBuf>) -> Self {
        Self::new(vec![dir.into()])
    }

    /// Load every prototype from every directory.
    ///
    /// A missing directory is skipped with a warning. A malformed file, or
    /// two files declaring the same prototype name, fails the whole load.
    pub fn load_all(&self) -> CatalogResult<Vec<Prototype>> {
        let mut prototypes = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for dir in &self.dirs {
            if !dir.exists() {
                warn!("Prototype directory does not exist: {:?}", dir);
                continue;
            }

            for entry in WalkDir::new(dir).sort_by_file_name() {
                let entry = entry.map_err(|e| CatalogError::InvalidPrototype {
                    path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone()),
                    message: e.to_string(),
                })?;
                let path = entry.path();
                if !entry.file_type().is_file() || !is_prototype_file(path) {
                    continue;
                }

                let proto = self.load_file(path)?;
                if let Some(first) = seen.get(&proto.name) {
                    return Err(CatalogError::InvalidPrototype {
                        path: path.to_path_buf(),
                        message: format!(
                            "duplicate prototype name '{}' (first defined in {})",
                            proto.name,
                            first.display()
                        ),
                    });
                }
                seen.insert(proto.name.clone(), path.to_path_buf());
                prototypes.push(proto);
            }
        }

        info!("Loaded {} prototype(s)", prototypes.len());
        Ok(prototypes)
    }

    /// Load a single prototype file.
    pub fn load_file(&self, path: &Path) -> CatalogResult<Prototype> {
        debug!("Loading prototype from {:?}", path);
        let content = fs::read_to_string(path)?;
        let invalid = |message: String| CatalogError::InvalidPrototype {
            path: path.to_path_buf(),
            message,
        };

        let proto = match extension(path).as_deref() {
            Some("jsonnet") => parse_jsonnet_prototype(&content).map_err(invalid)?,
            Some("json") => {
                serde_json::from_str::<Prototype>(&content).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_yaml::from_str::<Prototype>(&content).map_err(|e| invalid(e.to_string()))?,
        };

        proto.validate().map_err(|e| match e {
            CatalogError::InvalidPrototype { message, .. } => invalid(message),
            other => other,
        })?;
        Ok(proto)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn is_prototype_file(path: &Path) -> bool {
    matches!(
        extension(path).as_deref(),
        Some("yaml" | "yml" | "json" | "jsonnet")
    )
}
