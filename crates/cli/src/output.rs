//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::client::{ConnectionParams, ShareInfo};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain `key: value` lines
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl TableDisplay for ShareInfo {
    fn headers() -> Vec<&'static str> {
        vec!["IP", "All addresses", "Password"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.ip.clone(), self.ips.join(", "), self.password.clone()]
    }
}

impl TableDisplay for ConnectionParams {
    fn headers() -> Vec<&'static str> {
        vec!["Host", "Port", "Password", "Encrypt", "Path"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.host.clone(),
            self.port.clone(),
            self.password.clone(),
            self.encrypt.clone(),
            self.path.clone(),
        ]
    }
}

/// Render a single item as a table
pub fn render_table<T: TableDisplay>(item: &T) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(T::headers());
    table.add_row(item.row());
    table.to_string()
}

/// Print a single item
pub fn print_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", render_table(item)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
        }
        OutputFormat::Plain => {
            let row = item.row();
            for (header, value) in T::headers().iter().zip(row.iter()) {
                println!("{}: {}", header, value);
            }
        }
    }
}

/// Print a single named value (URL, link, address)
pub fn print_value(key: &str, value: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), value.into());
            println!("{}", serde_json::Value::Object(map));
        }
        OutputFormat::Table => println!("{}: {}", key.bold(), value),
        OutputFormat::Plain => println!("{}", value),
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
