use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flashstats")]
#[command(about = "Collects flash/erase statistics from the device fleet over MQTT")]
#[command(version)]
#[command(
    long_about = "Connects to the cloud broker for a fixed window, folds device stats, status and serial messages into per-device counters and a recent-event log, and saves the result as a JSON snapshot for the dashboard."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (include log targets)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Enable debug logging (logs every received message)
    #[arg(long, global = true)]
    debug: bool,

    /// Only log errors
    #[arg(long, short, global = true, conflicts_with_all = ["verbose", "debug"])]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one collection window and save the snapshot
    Collect(commands::collect_cmd::CollectCommand),
    /// Print a summary of a saved snapshot
    Show(commands::show_cmd::ShowCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider for TLS support
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::ERROR
    } else {
        // progress and the final summary are the point of a scheduled run
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(cli.verbose || cli.debug)
        .init();

    match cli.command {
        Commands::Collect(cmd) => commands::collect_cmd::execute(cmd).await,
        Commands::Show(cmd) => commands::show_cmd::execute(cmd).await,
    }
}
