//! protokit CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or prototype resolution failure
//! - 3: Parameter failure
//! - 4: Template or evaluation error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use protokit_catalog::CatalogError;
use protokit_templates::TemplateError;

mod commands;

use commands::flags::FlagError;
use commands::session::Session;
use commands::{Cli, Commands, PrototypeCommands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const PARAMETER_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (verbose, quiet) = cli.verbosity();
    init_logging(verbose, quiet);

    let session = Session::new(cli.root, quiet);

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, &session),
        Commands::Prototype(proto) => match proto.command {
            PrototypeCommands::List(args) => commands::list::execute(args, &session),
            PrototypeCommands::Describe(args) => commands::describe::execute(args, &session),
            PrototypeCommands::Search(args) => commands::search::execute(args, &session),
            PrototypeCommands::Preview(args) => commands::preview::execute(args, &session),
            PrototypeCommands::Use(args) => commands::use_prototype::execute(args, &session),
        },
        Commands::Generate(args) => commands::use_prototype::execute(args, &session),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("protokit_cli=debug,protokit_catalog=debug,protokit_templates=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Output goes to stdout; keep diagnostics on stderr.
    let log_result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<TemplateError>() {
        return match err {
            TemplateError::Catalog(inner) => categorize_catalog_error(inner),
            err if err.is_parameter_failure() => ExitCodes::PARAMETER_FAILURE,
            TemplateError::Evaluation(_) | TemplateError::UnsupportedRenderingKind { .. } => {
                ExitCodes::TEMPLATE_ERROR
            }
            TemplateError::InvalidComponentName(_) => ExitCodes::INVALID_ARGS,
            _ => ExitCodes::GENERAL_ERROR,
        };
    }
    if let Some(err) = e.downcast_ref::<CatalogError>() {
        return categorize_catalog_error(err);
    }
    if let Some(err) = e.downcast_ref::<FlagError>() {
        return match err {
            FlagError::UnknownFlag { .. } | FlagError::RepeatedFlag(_) => {
                ExitCodes::PARAMETER_FAILURE
            }
            _ => ExitCodes::INVALID_ARGS,
        };
    }
    ExitCodes::GENERAL_ERROR
}

fn categorize_catalog_error(err: &CatalogError) -> u8 {
    match err {
        err if err.is_resolution_failure() => ExitCodes::INVALID_ARGS,
        CatalogError::UnknownTemplateKind(_) => ExitCodes::INVALID_ARGS,
        CatalogError::InvalidPrototype { .. } => ExitCodes::TEMPLATE_ERROR,
        _ => ExitCodes::GENERAL_ERROR,
    }
}
