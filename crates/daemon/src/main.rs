//! DeskShare Daemon
//!
//! Serves the screen-share control API: launches the VNC server and
//! websockify bridges, issues connection tokens and share links.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::DaemonConfig;
use deskshare_common::{InMemoryTokenStore, SystemLauncher};
use deskshare_web::WebServer;

#[derive(Parser)]
#[command(name = "deskshared")]
#[command(about = "DeskShare daemon - VNC screen-share control plane")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "DESKSHARE_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP listen address (overrides the config file)
    #[arg(short, long, env = "DESKSHARE_LISTEN")]
    listen: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Write the effective configuration to the config path and exit
    #[arg(long, conflicts_with = "print_config")]
    write_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    // Load configuration
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(deskshare_common::default_config_path);
    let mut config = DaemonConfig::load(&config_path)?;
    if let Some(listen) = cli.listen {
        config.listen.addr = listen;
    }

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    if cli.write_config {
        config.save(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    info!("DeskShare daemon v{}", deskshare_common::VERSION);
    info!("Configuration: {}", config_path.display());

    let addr: SocketAddr = config.listen.addr.parse()?;
    let tokens = Arc::new(InMemoryTokenStore::new(config.token_ttl()?));
    let server = WebServer::new(
        config.web_config()?,
        tokens,
        Arc::new(SystemLauncher),
        config.link_codec(),
    );

    let server_handle = tokio::spawn(server.serve(addr));

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
        result = server_handle => {
            match result {
                Ok(Err(e)) => tracing::error!("Web server error: {}", e),
                Err(e) => tracing::error!("Web server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
    }

    info!("Daemon shutdown complete");
    Ok(())
}
