//! Share link codec
//!
//! A share link is `address ++ password ++ mode-flag` run through a fixed
//! Caesar shift. It hides the address from a casual glance and nothing more:
//! there is no key, and the password is a constant shared by every link.

use serde::{Deserialize, Serialize};

use crate::types::ShareMode;
use crate::{Error, Result};

/// Password embedded in every link and handed to the viewer on redemption
pub const DEFAULT_LINK_PASSWORD: &str = "achour";

/// Shift applied when encoding
pub const DEFAULT_LINK_SHIFT: i32 = 3;

/// Shift ASCII letters (within their case) and digits (mod 10) by `n`.
/// Everything else is copied through.
pub fn shift(s: &str, n: i32) -> String {
    s.chars()
        .map(|c| match c {
            'a'..='z' => rotate(c, b'a', 26, n),
            'A'..='Z' => rotate(c, b'A', 26, n),
            '0'..='9' => rotate(c, b'0', 10, n),
            _ => c,
        })
        .collect()
}

fn rotate(c: char, base: u8, modulus: i32, n: i32) -> char {
    let offset = (c as u8 - base) as i32;
    let shifted = (offset + n).rem_euclid(modulus);
    (base + shifted as u8) as char
}

/// Contents of a decoded link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedLink {
    pub target_address: String,
    pub password: String,
    pub mode: ShareMode,
}

/// Encoder/decoder for share links
#[derive(Debug, Clone)]
pub struct LinkCodec {
    password: String,
    shift: i32,
}

impl Default for LinkCodec {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_PASSWORD, DEFAULT_LINK_SHIFT)
    }
}

impl LinkCodec {
    pub fn new(password: impl Into<String>, shift: i32) -> Self {
        Self {
            password: password.into(),
            shift,
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn encode(&self, target_address: &str, mode: ShareMode) -> String {
        let raw = format!("{}{}{}", target_address, self.password, mode.flag());
        shift(&raw, self.shift)
    }

    /// Reverse [`LinkCodec::encode`].
    ///
    /// The password is removed only as a suffix of the text preceding the
    /// mode flag, so an address that happens to contain it survives intact.
    pub fn decode(&self, link: &str) -> Result<DecodedLink> {
        let link = link.trim();
        if link.is_empty() {
            return Err(Error::Decode("link is empty".to_string()));
        }

        let decoded = shift(link, -self.shift);
        let mut chars = decoded.chars();
        let flag = chars
            .next_back()
            .ok_or_else(|| Error::Decode("link is empty".to_string()))?;
        let mode = ShareMode::from_flag(flag)
            .ok_or_else(|| Error::Decode(format!("unknown mode flag {:?}", flag)))?;

        let target_address = chars
            .as_str()
            .strip_suffix(self.password.as_str())
            .ok_or_else(|| Error::Decode("link does not carry the share password".to_string()))?;
        if target_address.is_empty() {
            return Err(Error::Decode("link carries no address".to_string()));
        }

        Ok(DecodedLink {
            target_address: target_address.to_string(),
            password: self.password.clone(),
            mode,
        })
    }
}
