//! External process launching
//!
//! Starts the VNC server and the websockify bridge. Launches are
//! fire-and-forget: the caller gets a [`LaunchHandle`] or a
//! [`Error::ProcessLaunch`], and a detached task reaps the child and logs how
//! it exited. Nothing restarts a process that dies.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Program and arguments for one external process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// VNC server command
    pub fn vnc_server(settings: &VncServerSettings) -> Self {
        Self::new(settings.binary.clone(), settings.args.clone())
    }

    /// websockify command bridging `bridge.listen_port` to `target_ip:vnc_port`
    ///
    /// `target_ip` ends up as a positional argument, so anything websockify
    /// could read as an option or split into several words is rejected.
    pub fn bridge(bridge: &BridgeSettings, target_ip: &str, vnc_port: u16) -> Result<Self> {
        if target_ip.is_empty()
            || target_ip.starts_with('-')
            || target_ip.chars().any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(Error::InvalidParameter(format!(
                "ip: {:?} is not a usable address",
                target_ip
            )));
        }

        let mut args = Vec::new();
        if let Some(cert) = &bridge.cert {
            args.push(format!("--cert={}", cert.display()));
        }
        if let Some(key) = &bridge.key {
            args.push(format!("--key={}", key.display()));
        }
        args.push(bridge.listen_port.to_string());
        args.push(format!("{}:{}", target_ip, vnc_port));
        Ok(Self::new(bridge.binary.clone(), args))
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Opaque handle to a launched process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchHandle {
    pub program: String,
    pub pid: Option<u32>,
}

/// Something that can start external processes
pub trait ProcessLauncher: Send + Sync {
    fn launch(&self, spec: &LaunchSpec) -> Result<LaunchHandle>;
}

/// Launcher that spawns real OS processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn launch(&self, spec: &LaunchSpec) -> Result<LaunchHandle> {
        debug!("Launching: {}", spec.command_line());

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| Error::ProcessLaunch {
                program: spec.program.clone(),
                message: e.to_string(),
            })?;

        let pid = child.id();
        info!("Started {} (pid {:?})", spec.program, pid);

        let program = spec.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => info!("{} exited", program),
                Ok(status) => warn!("{} exited with {}", program, status),
                Err(e) => warn!("Failed to wait for {}: {}", program, e),
            }
        });

        Ok(LaunchHandle {
            program: spec.program.clone(),
            pid,
        })
    }
}

/// VNC server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VncServerSettings {
    /// VNC server binary
    pub binary: String,

    /// Arguments passed to the binary
    pub args: Vec<String>,

    /// Port the VNC server listens on
    pub port: u16,
}

impl Default for VncServerSettings {
    fn default() -> Self {
        Self {
            binary: "tvnserver".to_string(),
            args: vec!["-run".to_string()],
            port: 5900,
        }
    }
}

/// websockify bridge settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// websockify binary
    pub binary: String,

    /// WebSocket port the bridge listens on
    pub listen_port: u16,

    /// TLS certificate handed to the bridge
    pub cert: Option<PathBuf>,

    /// TLS key handed to the bridge
    pub key: Option<PathBuf>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            binary: "websockify".to_string(),
            listen_port: 8085,
            cert: Some(PathBuf::from("cert.pem")),
            key: Some(PathBuf::from("key.pem")),
        }
    }
}
