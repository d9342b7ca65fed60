//! Core types shared by the DeskShare daemon, web facade and CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Unique identifier of an issued connection token
pub type TokenId = String;

/// How much a link holder may do with the shared desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ShareMode {
    /// Viewer only, input is ignored
    #[default]
    View,
    /// Full keyboard and mouse control
    Control,
}

impl ShareMode {
    /// Single-character flag carried at the end of an encoded link
    pub fn flag(self) -> char {
        match self {
            ShareMode::View => '0',
            ShareMode::Control => '1',
        }
    }

    pub fn from_flag(c: char) -> Option<Self> {
        match c {
            '0' => Some(ShareMode::View),
            '1' => Some(ShareMode::Control),
            _ => None,
        }
    }

    /// Interpret a loosely-typed JSON value (`"0"`, `1`, `"control"`, ...).
    pub fn from_json(value: &serde_json::Value) -> Result<Self, Error> {
        match value {
            serde_json::Value::String(s) => s.parse(),
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(ShareMode::View),
                Some(1) => Ok(ShareMode::Control),
                _ => Err(Error::InvalidParameter(format!("mode {}", n))),
            },
            other => Err(Error::InvalidParameter(format!("mode {}", other))),
        }
    }

    pub fn is_view_only(self) -> bool {
        self == ShareMode::View
    }
}

impl FromStr for ShareMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "view" => Ok(ShareMode::View),
            "1" | "control" => Ok(ShareMode::Control),
            other => Err(Error::InvalidParameter(format!("mode {:?}", other))),
        }
    }
}

impl TryFrom<String> for ShareMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ShareMode> for String {
    fn from(mode: ShareMode) -> Self {
        mode.flag().to_string()
    }
}

impl fmt::Display for ShareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareMode::View => write!(f, "view"),
            ShareMode::Control => write!(f, "control"),
        }
    }
}

/// Address and password a viewer needs to reach a shared desktop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub target_address: String,
    pub password: String,
}

/// A redeemable reference to a set of credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionToken {
    pub id: TokenId,
    pub target_address: String,
    pub password: String,
    pub expires_at: DateTime<Utc>,
}

impl ConnectionToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            target_address: self.target_address.clone(),
            password: self.password.clone(),
        }
    }
}

/// The host's currently published share settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareConfig {
    pub ip: String,
    pub password: String,
}
