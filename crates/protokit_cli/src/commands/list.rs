//! List command implementation.

use anyhow::Result;
use clap::Args;

use super::session::Session;

#[derive(Args)]
pub struct ListArgs {}

pub fn execute(_args: ListArgs, session: &Session) -> Result<()> {
    let project = session.project()?;
    let catalog = session.catalog(project.as_ref())?;
    print!("{}", protokit_catalog::list(&catalog)?);
    Ok(())
}
