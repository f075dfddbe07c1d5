//! Search command implementation.

use anyhow::Result;
use clap::{Args, ValueEnum};

use protokit_catalog::SearchMode;

use super::session::Session;

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in prototype names
    pub query: String,

    /// How the query is matched against names
    #[arg(long, value_enum, default_value = "substring")]
    pub mode: SearchModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchModeArg {
    Substring,
    Suffix,
    Exact,
}

impl From<SearchModeArg> for SearchMode {
    fn from(mode: SearchModeArg) -> Self {
        match mode {
            SearchModeArg::Substring => SearchMode::Substring,
            SearchModeArg::Suffix => SearchMode::Suffix,
            SearchModeArg::Exact => SearchMode::Exact,
        }
    }
}

pub fn execute(args: SearchArgs, session: &Session) -> Result<()> {
    let project = session.project()?;
    let catalog = session.catalog(project.as_ref())?;
    print!(
        "{}",
        protokit_catalog::search(&args.query, args.mode.into(), &catalog)?
    );
    Ok(())
}
