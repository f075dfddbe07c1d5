//! Init command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use protokit_catalog::{Project, CONFIG_FILE};

use super::session::Session;

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to --root or the current directory)
    pub path: Option<PathBuf>,
}

pub fn execute(args: InitArgs, session: &Session) -> Result<()> {
    let root = match args.path {
        Some(path) => path,
        None => session.base_dir()?,
    };

    if root.join(CONFIG_FILE).exists() {
        bail!("{} already contains {}", root.display(), CONFIG_FILE);
    }

    let project = Project::init(&root)
        .with_context(|| format!("Failed to initialize project at {}", root.display()))?;
    for dir in project
        .prototype_dirs()
        .into_iter()
        .chain(std::iter::once(project.components_dir()))
    {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    info!("Initialized project at {:?}", project.root);
    if !session.quiet {
        println!("✅ Initialized protokit project at {}", project.root.display());
    }
    Ok(())
}
