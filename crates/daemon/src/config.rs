//! Daemon configuration

use deskshare_common::{
    link::{DEFAULT_LINK_PASSWORD, DEFAULT_LINK_SHIFT},
    token::DEFAULT_TOKEN_TTL_SECS,
    BridgeSettings, LinkCodec, VncServerSettings,
};
use deskshare_web::WebServerConfig;
use serde::{Deserialize, Serialize};

/// Longest accepted token or share-config lifetime (ten years)
pub const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// HTTP listen address
    pub listen: ListenConfig,

    /// VNC server configuration
    pub vnc: VncServerSettings,

    /// websockify bridge configuration
    pub bridge: BridgeSettings,

    /// noVNC viewer location
    pub viewer: ViewerConfig,

    /// Token lifetimes
    pub tokens: TokenConfig,

    /// Share link encoding
    pub link: LinkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub addr: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Where the noVNC page is served
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Port of the site hosting noVNC
    pub port: u16,

    /// Path of vnc.html on that site
    pub path: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            path: "/novnc/vnc.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Connection token lifetime
    pub ttl_secs: i64,

    /// How long a published share config is remembered
    pub share_config_ttl_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            share_config_ttl_secs: 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Constant password embedded in every link
    pub password: String,

    /// Caesar shift applied to links
    pub shift: i32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_LINK_PASSWORD.to_string(),
            shift: DEFAULT_LINK_SHIFT,
        }
    }
}

impl DaemonConfig {
    /// Load configuration from file
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the daemon cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.token_ttl()?;
        ttl_from_secs("tokens.share_config_ttl_secs", self.tokens.share_config_ttl_secs)?;
        Ok(())
    }

    pub fn token_ttl(&self) -> anyhow::Result<chrono::Duration> {
        ttl_from_secs("tokens.ttl_secs", self.tokens.ttl_secs)
    }

    pub fn link_codec(&self) -> LinkCodec {
        LinkCodec::new(self.link.password.clone(), self.link.shift)
    }

    /// Settings handed to the web layer
    pub fn web_config(&self) -> anyhow::Result<WebServerConfig> {
        Ok(WebServerConfig {
            vnc: self.vnc.clone(),
            bridge: self.bridge.clone(),
            viewer_port: self.viewer.port,
            viewer_path: self.viewer.path.clone(),
            share_config_ttl: ttl_from_secs(
                "tokens.share_config_ttl_secs",
                self.tokens.share_config_ttl_secs,
            )?,
        })
    }
}

fn ttl_from_secs(name: &str, secs: i64) -> anyhow::Result<chrono::Duration> {
    anyhow::ensure!(secs > 0, "{} must be positive, got {}", name, secs);
    anyhow::ensure!(
        secs <= MAX_TTL_SECS,
        "{} must be at most {} seconds, got {}",
        name,
        MAX_TTL_SECS,
        secs
    );
    chrono::Duration::try_seconds(secs)
        .ok_or_else(|| anyhow::anyhow!("{} is out of range: {}", name, secs))
}
