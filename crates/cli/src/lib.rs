//! DeskShare CLI
//!
//! Command-line client for the DeskShare daemon's screen-share API.

pub mod client;
pub mod commands;
pub mod output;
