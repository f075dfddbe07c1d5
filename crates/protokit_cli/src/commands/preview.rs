//! Preview command implementation.

use anyhow::Result;
use clap::Args;
use tracing::debug;

use protokit_catalog::{describe, resolve, TemplateKind};
use protokit_templates::resolve_and_expand;

use super::flags::{help_text, FlagError, RawArgs};
use super::session::Session;

/// Component name the preview is expanded for.
pub const PREVIEW_TARGET: &str = "preview";

const USAGE: &str = "protokit prototype preview <query> [kind] [--<param>=<value> | --<param> <value>]...";

#[derive(Args)]
#[command(disable_help_flag = true)]
pub struct PreviewArgs {
    /// <query> [kind] followed by the prototype's parameter flags
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS"
    )]
    pub args: Vec<String>,
}

pub fn execute(args: PreviewArgs, session: &Session) -> Result<()> {
    let raw = RawArgs::parse(&args.args)?;
    let project = session.project()?;
    let catalog = session.catalog(project.as_ref())?;

    if raw.help {
        let description = match raw.positionals.first() {
            Some(query) => Some(describe(query, &catalog)?),
            None => None,
        };
        println!("{}", help_text(USAGE, description.as_ref()));
        return Ok(());
    }

    if raw.force {
        return Err(FlagError::UnexpectedArgument("--force".to_string()).into());
    }
    let query = raw.positional(0, "query")?;
    raw.expect_at_most(2)?;
    let kind = match raw.positionals.get(1) {
        Some(kind) => kind.parse::<TemplateKind>()?,
        None => TemplateKind::Jsonnet,
    };

    let proto = resolve(query, &catalog)?;
    let values = raw.param_values(proto)?;
    debug!("Previewing {} as {} with {} flags", proto.name, kind, values.len());

    let expander = session.expander(project.as_ref());
    let expansion = resolve_and_expand(query, kind, &values, PREVIEW_TARGET, &catalog, &expander)?;
    println!("{}", expansion.text);
    Ok(())
}
