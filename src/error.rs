//! Error types shared by the library and binary.
//!
//! Internally everything is an `anyhow::Error` with context attached at each I/O or SQL call.
//! Errors that leave a public command are tagged with an `ErrorType` so that the CLI and the MCP
//! server can tell the user which layer failed.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure that is reported to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// A SQLite query or migration failed, or a requested record does not exist.
    Database,
    /// The user supplied an invalid argument, e.g. an end date before a start date.
    Request,
    /// Reading or writing a file (backups, exports) failed.
    Filesystem,
    /// The MCP server failed to start or stopped unexpectedly.
    Service,
}

impl ErrorType {
    fn label(&self) -> &'static str {
        match self {
            ErrorType::Config => "Configuration error",
            ErrorType::Database => "Database error",
            ErrorType::Request => "Invalid request",
            ErrorType::Filesystem => "Filesystem error",
            ErrorType::Service => "Service error",
        }
    }
}

serde_plain::derive_display_from_serialize!(ErrorType);

/// Converts internal results into results that are fit to return from a public command.
pub trait IntoResult<T> {
    /// Tags the error, if any, with `error_type` so that the message shown to the user starts
    /// with a description of the failing layer.
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let e: anyhow::Error = e.into();
            anyhow::anyhow!("{}: {:#}", error_type.label(), e)
        })
    }
}
