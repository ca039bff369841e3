use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its subdirectories and:
/// - Creates an initial `config.json` file with default settings
/// - Creates the SQLite database with the current schema
///
/// # Arguments
/// - `daybook_home` - The directory that will be the root of data directory, e.g. `$HOME/daybook`
///
/// # Errors
/// - Returns an error if any file operations fail or if the directory already holds a database.
pub async fn init(daybook_home: &Path) -> Result<Out<()>> {
    let config = Config::create(daybook_home)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the daybook directory at '{}'",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("daybook");
        let out = init(&home).await.unwrap();
        assert!(out.message().starts_with("Successfully created"));
        assert!(home.join("config.json").is_file());
        assert!(home.join("daybook.sqlite").is_file());

        let err = init(&home).await.unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
