//! Command handlers for the daybook CLI.
//!
//! This module contains implementations for all CLI subcommands. The MCP server calls the same
//! handlers, so both interfaces report the same messages and data.

mod backup;
mod debts;
mod delete;
mod export;
mod init;
mod insert;
mod list;
mod mcp;
mod summary;
mod update;

use crate::error::{ErrorType, IntoResult};
use crate::Result;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use backup::backup;
pub use debts::{debts, pay, DebtReport};
pub use delete::delete;
pub use export::{export, ExportReport};
pub use init::init;
pub use insert::{
    insert_cash, insert_debt, insert_expense, insert_note, insert_paraniz_batch,
    insert_paraniz_sale, insert_product, insert_transformation,
};
pub use list::{list, Listing};
pub use mcp::mcp;
pub use summary::{daily_summary, range_summary, summary, Summary};
pub use update::{
    update_debt, update_expense, update_note, update_paraniz_batch, update_paraniz_sale,
    update_product, update_transformation,
};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data to both the command line and MCP server interfaces.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Converts the structured data, keeping the message.
    pub fn map<U, F>(self, f: F) -> Out<U>
    where
        U: Serialize + Clone + Debug,
        F: FnOnce(T) -> U,
    {
        Out {
            message: self.message,
            structure: self.structure.map(f),
        }
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Fails with an `ErrorType::Request` error carrying `message` when `condition` is false.
pub(crate) fn require(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(anyhow::anyhow!("{message}")).pub_result(ErrorType::Request)
    }
}
