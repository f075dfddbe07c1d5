//! CLI command definitions.
//!
//! This module defines the command structure for the protokit CLI.
//! Prototype commands live under `prototype`; `generate` is a shortcut for
//! `prototype use`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod describe;
pub mod flags;
pub mod init;
pub mod list;
pub mod preview;
pub mod search;
pub mod session;
pub mod use_prototype;

/// protokit - prototype catalog and component generator
#[derive(Parser)]
#[command(name = "protokit")]
#[command(version, about = "protokit - prototype catalog and component generator")]
#[command(long_about = r#"
protokit finds prototypes by (partial) name, binds parameters against their
schema and expands them into Jsonnet, JSON or YAML components.

WORKFLOWS:
  init                → Create a protokit.yaml project
  prototype list      → List every known prototype
  prototype describe  → Show a prototype's parameters and template types
  prototype search    → Find prototypes whose name contains a string
  prototype preview   → Expand a prototype to stdout
  prototype use       → Expand a prototype into the project's components
  generate            → Same as `prototype use`

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or prototype resolution failure
  3 - Parameter failure
  4 - Template or evaluation error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root (defaults to the nearest directory containing protokit.yaml)
    #[arg(long, global = true, env = "PROTOKIT_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// `(verbose, quiet)`, counting `-v`/`-q` given after a prototype query.
    pub fn verbosity(&self) -> (bool, bool) {
        let trailing = match &self.command {
            Commands::Prototype(PrototypeArgs {
                command: PrototypeCommands::Preview(args),
            }) => Some(&args.args),
            Commands::Prototype(PrototypeArgs {
                command: PrototypeCommands::Use(args),
            })
            | Commands::Generate(args) => Some(&args.args),
            _ => None,
        };
        let raw = trailing
            .and_then(|args| flags::RawArgs::parse(args).ok())
            .unwrap_or_default();
        (self.verbose || raw.verbose, self.quiet || raw.quiet)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a protokit project
    Init(init::InitArgs),

    /// Inspect and expand prototypes
    Prototype(PrototypeArgs),

    /// Expand a prototype into a component (alias of `prototype use`)
    Generate(use_prototype::UseArgs),
}

#[derive(Args)]
pub struct PrototypeArgs {
    #[command(subcommand)]
    pub command: PrototypeCommands,
}

#[derive(Subcommand)]
pub enum PrototypeCommands {
    /// List all known prototypes
    List(list::ListArgs),

    /// Describe a prototype
    Describe(describe::DescribeArgs),

    /// Search for prototypes by name
    Search(search::SearchArgs),

    /// Expand a prototype and print the result
    Preview(preview::PreviewArgs),

    /// Expand a prototype into a new component
    Use(use_prototype::UseArgs),
}
