//! op CLI entry point.
//!
//! This binary provides the `op` command: pick a project under the
//! configured source directory, pick an action, and run it.

use clap::Parser;
use op::cli::Cli;
use op::config::Configuration;
use op::error::Result;
use op::picker::FzfPicker;
use op::{actions, listing, loader};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let config = loader::load(cli.config.as_deref())?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if cli.list {
        for entry in project_entries(&config)? {
            println!("{}", entry);
        }
        return Ok(());
    }

    let picker = FzfPicker::default();

    let project = match &cli.project {
        Some(project) => project.clone(),
        None => actions::select_project(&picker, &project_entries(&config)?)?,
    };

    let action = match cli.action {
        Some(action) => action,
        None => actions::select_action(&picker, &config)?,
    };

    let path = actions::resolve_selection(&config, &project)?;
    actions::run(action, &path, &config)
}

/// Directory names under the configured source root.
fn project_entries(config: &Configuration) -> Result<Vec<String>> {
    let root = actions::source_root(config)?;
    listing::list_entries(Path::new(&root))
}
