//! daybook: a daily cash book for a small shop.
//!
//! Records live in a SQLite database under `$DAYBOOK_HOME`. The `aggregate` module turns a day's
//! records into the end-of-day dashboard; `commands` are the operations shared by the CLI and the
//! MCP server.

pub mod aggregate;
pub mod args;
mod backup;
pub mod commands;
mod config;
mod db;
mod error;
mod mcp;
pub mod model;
pub mod records;
mod utils;

#[cfg(test)]
mod test;

pub use config::Config;
pub use db::DateFilter;
pub use error::{Error, Result};
