//! Describe command implementation.

use anyhow::Result;
use clap::Args;

use super::session::Session;

#[derive(Args)]
pub struct DescribeArgs {
    /// Full or partial prototype name
    pub query: String,
}

pub fn execute(args: DescribeArgs, session: &Session) -> Result<()> {
    let project = session.project()?;
    let catalog = session.catalog(project.as_ref())?;
    let description = protokit_catalog::describe(&args.query, &catalog)?;
    println!("{}", description);
    Ok(())
}
