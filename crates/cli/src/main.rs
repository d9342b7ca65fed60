//! DeskShare CLI - Main Entry Point

use clap::{Parser, Subcommand};

use deskshare_cli::client::ApiClient;
use deskshare_cli::commands::{link, share};
use deskshare_cli::output::{self, print_error};

/// DeskShare CLI - VNC screen sharing over websockify
#[derive(Parser)]
#[command(name = "deskshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Daemon address
    #[arg(long, default_value = "http://127.0.0.1:5000", env = "DESKSHARE_ADDR", global = true)]
    addr: String,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start shares, bridges and redeem tokens
    #[command(subcommand)]
    Share(share::ShareCommands),

    /// Generate, use and decode share links
    #[command(subcommand)]
    Link(link::LinkCommands),

    /// Check daemon status
    Status,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = ApiClient::new(&cli.addr)?;

    let result = match cli.command {
        Commands::Share(cmd) => share::execute(cmd, client, cli.format).await,
        Commands::Link(cmd) => link::execute(cmd, client, cli.format).await,
        Commands::Status => {
            if client.health_check().await {
                output::print_success(&format!("Daemon is running at {}", cli.addr));
                Ok(())
            } else {
                print_error(&format!("Daemon is not responding at {}", cli.addr));
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("DeskShare CLI v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
