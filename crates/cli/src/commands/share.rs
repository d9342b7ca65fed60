//! Share Commands

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::client::ApiClient;
use crate::output::{print_info, print_item, print_success, print_value, OutputFormat};

#[derive(Subcommand)]
pub enum ShareCommands {
    /// Start the VNC server and print its address and password
    Start,

    /// Launch a websockify bridge and print a token URL for it
    Bridge(BridgeArgs),

    /// Redeem a token for connection parameters
    Connect(ConnectArgs),

    /// Print this host's primary address
    Ip,
}

#[derive(Args)]
pub struct BridgeArgs {
    /// Address of the VNC server to bridge to
    #[arg(long)]
    pub ip: String,

    /// VNC password
    #[arg(long, env = "DESKSHARE_VNC_PASSWORD")]
    pub password: String,

    /// Open the viewer URL in a browser
    #[arg(short, long)]
    pub open: bool,
}

#[derive(Args)]
pub struct ConnectArgs {
    /// Token from a viewer URL
    pub token: String,
}

pub async fn execute(cmd: ShareCommands, client: ApiClient, format: OutputFormat) -> Result<()> {
    match cmd {
        ShareCommands::Start => {
            let info = client.start_share().await?;
            if matches!(format, OutputFormat::Table) {
                print_success("VNC server started");
            }
            print_item(&info, format);
        }
        ShareCommands::Bridge(args) => {
            let url = client.start_novnc(&args.ip, &args.password).await?;
            print_value("url", &url, format);
            if args.open {
                super::open_in_browser(&url)?;
            } else if matches!(format, OutputFormat::Table) {
                print_info("Token is valid for 24 hours by default");
            }
        }
        ShareCommands::Connect(args) => {
            let params = client.connect(&args.token).await?;
            print_item(&params, format);
        }
        ShareCommands::Ip => {
            let ip = client.get_ip().await?;
            print_value("ip", &ip, format);
        }
    }

    Ok(())
}
