//! Share Link Commands

use anyhow::Result;
use clap::{Args, Subcommand};
use deskshare_common::{LinkCodec, ShareMode};

use crate::client::ApiClient;
use crate::output::{print_value, OutputFormat};

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Generate a share link for this host
    Generate(GenerateArgs),

    /// Bridge to the host behind a link and print the viewer URL
    Use(UseArgs),

    /// Decode a link locally without contacting the daemon
    Decode(DecodeArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Access granted to the link holder: view or control
    #[arg(short, long, default_value = "view")]
    pub mode: ShareMode,
}

#[derive(Args)]
pub struct UseArgs {
    pub link: String,

    /// Open the viewer URL in a browser
    #[arg(short, long)]
    pub open: bool,
}

#[derive(Args)]
pub struct DecodeArgs {
    pub link: String,

    /// Password the link was encoded with
    #[arg(long, default_value = deskshare_common::link::DEFAULT_LINK_PASSWORD)]
    pub password: String,

    /// Shift the link was encoded with
    #[arg(long, default_value_t = deskshare_common::link::DEFAULT_LINK_SHIFT)]
    pub shift: i32,
}

pub async fn execute(cmd: LinkCommands, client: ApiClient, format: OutputFormat) -> Result<()> {
    match cmd {
        LinkCommands::Generate(args) => {
            let link = client.generate_link(args.mode).await?;
            print_value("link", &link, format);
        }
        LinkCommands::Use(args) => {
            let url = client.use_link(&args.link).await?;
            print_value("url", &url, format);
            if args.open {
                super::open_in_browser(&url)?;
            }
        }
        LinkCommands::Decode(args) => {
            let decoded = LinkCodec::new(args.password, args.shift).decode(&args.link)?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&decoded)?);
                }
                _ => {
                    print_value("address", &decoded.target_address, format);
                    print_value("mode", &decoded.mode.to_string(), format);
                }
            }
        }
    }

    Ok(())
}
