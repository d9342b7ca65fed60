//! DeskShare Common Library
//!
//! Token store, share-link codec, process launcher and host discovery
//! shared by the daemon, the web facade and the CLI.

pub mod crypto;
pub mod error;
pub mod launcher;
pub mod link;
pub mod netinfo;
pub mod token;
pub mod types;

// Re-export commonly used types
pub use crypto::generate_password;
pub use error::{Error, Result};
pub use launcher::{
    BridgeSettings, LaunchHandle, LaunchSpec, ProcessLauncher, SystemLauncher, VncServerSettings,
};
pub use link::{DecodedLink, LinkCodec};
pub use token::{Clock, InMemoryTokenStore, SystemClock, TokenStore};
pub use types::*;

/// DeskShare version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default store path
pub fn default_store_path() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".deskshare")
}

/// Default configuration file
pub fn default_config_path() -> std::path::PathBuf {
    default_store_path().join("config.toml")
}

/// Home directory helper
mod dirs {
    pub fn home_dir() -> Option<std::path::PathBuf> {
        std::env::var_os("HOME").map(std::path::PathBuf::from)
    }
}
