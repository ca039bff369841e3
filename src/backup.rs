//! Rotating copies of the SQLite database.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;
use tracing::debug;

/// Prefix for SQLite backup files.
pub const SQLITE: &str = "daybook.sqlite";

/// Manages backup file creation and rotation.
///
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    sqlite_path: PathBuf,
}

impl Backup {
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            sqlite_path: config.sqlite_path().to_path_buf(),
        }
    }

    /// Copies the SQLite database file to the backups directory.
    ///
    /// The filename format is `daybook.sqlite.YYYY-MM-DD-NNN`, where `NNN` counts the backups
    /// taken that day. Old backups are rotated out, keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file.
    pub async fn copy_sqlite(&self) -> Result<PathBuf> {
        let date = today();
        let seq = self.next_sequence_number(SQLITE, &date).await?;
        let path = self.backups_dir.join(format!("{SQLITE}.{date}-{seq:03}"));

        utils::copy(&self.sqlite_path, &path).await?;
        debug!("Backed up the database to '{}'", path.display());

        self.rotate(SQLITE).await?;

        Ok(path)
    }

    /// Scans the backups directory for files with the given prefix and date and returns the next
    /// sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let file_name = entry.file_name();
            if let Some(seq) = parse_sequence_number(&file_name.to_string_lossy(), prefix, date) {
                max_seq = max_seq.max(seq);
            }
        }

        Ok(max_seq + 1)
    }

    /// Deletes the oldest backups with `prefix` until only `backup_copies` remain.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        // Names sort by date, then sequence number.
        files.sort_by(|a, b| a.1.cmp(&b.1));

        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, name) in files.into_iter().take(to_delete) {
            debug!("Rotating out backup {name}");
            utils::remove(&path).await?;
        }

        Ok(())
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses `NNN` out of `{prefix}.{date}-NNN`.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    filename
        .strip_prefix(&format!("{prefix}.{date}-"))?
        .parse()
        .ok()
}

/// Checks for `{prefix}.YYYY-MM-DD-NNN`.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    let Some(rest) = filename.strip_prefix(&format!("{prefix}.")) else {
        return false;
    };
    match rest.rsplit_once('-') {
        Some((date, seq)) => {
            date.len() == 10 && !seq.is_empty() && seq.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
