//! # fsbind
//!
//! Command-line host for fsbind output bindings.
//!
//! Loads a component file, constructs the binding it names and drives it:
//! - `fsbind components` — list the component types this host knows
//! - `fsbind operations` — show what the component supports
//! - `fsbind invoke` — send one request to the component

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Run fsbind output bindings from the command line.
#[derive(Parser)]
#[command(name = "fsbind", version, about)]
struct Cli {
    /// Component file describing the binding (TOML).
    #[arg(long, default_value = "component.toml")]
    component: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered component types.
    Components,
    /// List the operations the component supports.
    Operations {
        /// Print as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Invoke the component with one request.
    Invoke(commands::invoke::InvokeArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so command output on stdout stays clean.
    // RUST_LOG, when set, replaces the default directives entirely.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fsbind_connector_fs=info,fsbind=info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let registry = commands::registry();

    match &cli.command {
        Commands::Components => commands::components::execute(&registry),
        Commands::Operations { json } => {
            commands::operations::execute(&registry, &cli.component, *json)
        }
        Commands::Invoke(args) => commands::invoke::execute(&registry, &cli.component, args),
    }
}
