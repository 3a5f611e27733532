mod audit;
mod capability;
mod classes;
mod cli;
mod descriptor;
mod error;
mod javap;
mod registry;
mod report;
mod scan;
mod server;
mod xml;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Re-export Command from cli module
use cli::Command;

/// JNDI resource reconciliation auditor
///
/// Juxtaposes the resources application code requests via @Resource with
/// the resources deployment and provisioning XML declares.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output JSON (default output is human readable)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = args.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    cli::handle_command(args.command, args.json)
}
