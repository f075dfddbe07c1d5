//! Use command implementation.
//!
//! Expands a prototype and writes the result as a new component of the
//! current project. Also reachable as `protokit generate`.

use anyhow::Result;
use clap::Args;
use tracing::info;

use protokit_catalog::{describe, resolve, TemplateKind};
use protokit_templates::{resolve_and_expand, ComponentWriter};

use super::flags::{help_text, RawArgs};
use super::session::Session;

const USAGE: &str = "protokit prototype use [--force] <query> <component> [kind] [--<param>=<value> | --<param> <value>]...";

#[derive(Args)]
#[command(disable_help_flag = true)]
pub struct UseArgs {
    /// Replace an existing component of the same name
    #[arg(long)]
    pub force: bool,

    /// <query> <component> [kind] followed by the prototype's parameter flags
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS"
    )]
    pub args: Vec<String>,
}

pub fn execute(args: UseArgs, session: &Session) -> Result<()> {
    let raw = RawArgs::parse(&args.args)?;

    if raw.help {
        let project = session.project()?;
        let catalog = session.catalog(project.as_ref())?;
        let description = match raw.positionals.first() {
            Some(query) => Some(describe(query, &catalog)?),
            None => None,
        };
        println!("{}", help_text(USAGE, description.as_ref()));
        return Ok(());
    }

    let project = session.require_project()?;
    let catalog = session.catalog(Some(&project))?;

    let query = raw.positional(0, "query")?;
    let component = raw.positional(1, "component")?;
    raw.expect_at_most(3)?;
    let kind = match raw.positionals.get(2) {
        Some(kind) => kind.parse::<TemplateKind>()?,
        None => TemplateKind::Jsonnet,
    };

    let proto = resolve(query, &catalog)?;
    let values = raw.param_values(proto)?;

    let expander = session.expander(Some(&project));
    let expansion = resolve_and_expand(query, kind, &values, component, &catalog, &expander)?;

    let writer = ComponentWriter::new(project.components_dir()).overwrite(args.force || raw.force);
    let path = writer.create(component, &expansion.text, &expansion.params, expansion.kind)?;

    info!("Created component {} from {}", component, expansion.prototype);
    if !session.quiet {
        println!(
            "✅ Created component '{}' from {} at {}",
            component,
            expansion.prototype,
            path.display()
        );
    }
    Ok(())
}
