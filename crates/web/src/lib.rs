//! DeskShare Web API
//!
//! HTTP facade over the token store, link codec and process launcher.

pub mod error;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use server::{ConnectionParams, WebServer, WebServerConfig};
