//! Per-invocation state shared by the commands: where the project is and
//! how to build a catalog and expander for it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use protokit_catalog::{CatalogError, CatalogIndex, Project};
use protokit_templates::TemplateExpander;

pub struct Session {
    root: Option<PathBuf>,
    pub quiet: bool,
}

impl Session {
    pub fn new(root: Option<PathBuf>, quiet: bool) -> Self {
        Self { root, quiet }
    }

    /// Directory commands operate on: `--root` or the current directory.
    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir().context("Failed to read current directory"),
        }
    }

    /// The active project, if any.
    ///
    /// An explicit `--root` must be a project; otherwise the current
    /// directory and its ancestors are searched.
    pub fn project(&self) -> Result<Option<Project>> {
        if let Some(root) = &self.root {
            let project = Project::open(root)
                .with_context(|| format!("Failed to open project at {}", root.display()))?;
            return Ok(Some(project));
        }

        let cwd = self.base_dir()?;
        match Project::discover(&cwd) {
            Ok(project) => {
                debug!("Using project at {:?}", project.root);
                Ok(Some(project))
            }
            Err(CatalogError::ConfigNotFound(_)) => {
                debug!("No project found from {:?}; using built-in prototypes", cwd);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The active project, failing when there is none.
    pub fn require_project(&self) -> Result<Project> {
        match self.project()? {
            Some(project) => Ok(project),
            None => Err(CatalogError::ConfigNotFound(self.base_dir()?))
                .context("This command can only be run inside a protokit project"),
        }
    }

    /// Built-in prototypes plus those of `project`.
    pub fn catalog(&self, project: Option<&Project>) -> Result<CatalogIndex> {
        let external = match project {
            Some(project) => project
                .loader()
                .load_all()
                .context("Failed to load project prototypes")?,
            None => Vec::new(),
        };
        let catalog = CatalogIndex::with_builtins(external);
        info!("Catalog has {} prototypes", catalog.len());
        Ok(catalog)
    }

    pub fn expander(&self, project: Option<&Project>) -> TemplateExpander {
        match project {
            Some(project) => {
                TemplateExpander::default().with_params_ext_var(project.config.params_ext_var.clone())
            }
            None => TemplateExpander::default(),
        }
    }
}
