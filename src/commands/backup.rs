//! Backup command handler.

use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use std::path::PathBuf;

/// Copies the database into the backups directory, rotating out the oldest copies.
pub async fn backup(config: Config) -> Result<Out<PathBuf>> {
    let path = config
        .backup()
        .copy_sqlite()
        .await
        .pub_result(ErrorType::Filesystem)?;
    Ok(Out::new(
        format!("Backed up the database to '{}'", path.display()),
        path,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_backup() {
        let env = TestEnv::new().await;
        let out = backup(env.config()).await.unwrap();
        let path = out.structure().unwrap();
        assert!(path.is_file());
        assert!(path.starts_with(env.config().backups()));
    }
}
