//! Configuration file handling.
//!
//! The configuration file is stored at `$DAYBOOK_HOME/config.json` and holds the few settings the
//! program has: how many database backups to keep and the name of the local currency.

use crate::backup::Backup;
use crate::db::Db;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "daybook";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const CURRENCY: &str = "TL";
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const DAYBOOK_SQLITE: &str = "daybook.sqlite";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$DAYBOOK_HOME` and from there it loads `$DAYBOOK_HOME/config.json`. It also owns
/// the database handle, so a `Config` is all a command needs.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    db: Db,
    sqlite_path: PathBuf,
}

impl Config {
    /// Creates the data directory, the backups directory, an initial `config.json` and the
    /// SQLite database.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail or if a database already exists in `dir`.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the daybook home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let sqlite_path = root.join(DAYBOOK_SQLITE);
        let db = Db::init(&sqlite_path)
            .await
            .context("Unable to create SQLite DB")?;

        Ok(Self {
            root,
            backups,
            config_path,
            config_file,
            db,
            sqlite_path,
        })
    }

    /// This will
    /// - validate that `daybook_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory exists
    /// - open the database, migrating it if needed
    pub async fn load(daybook_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = daybook_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Daybook home is missing, run 'daybook init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let backups = root.join(BACKUPS);
        if !backups.is_dir() {
            bail!("The backups directory is missing '{}'", backups.display())
        }

        let sqlite_path = root.join(DAYBOOK_SQLITE);
        let db = Db::load(&sqlite_path)
            .await
            .context("Unable to load SQLite DB")?;

        Ok(Self {
            root,
            backups,
            config_path,
            config_file,
            db,
            sqlite_path,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub(crate) fn db(&self) -> &Db {
        &self.db
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn sqlite_path(&self) -> &Path {
        &self.sqlite_path
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// The suffix printed after amounts, e.g. `TL`.
    pub fn currency(&self) -> &str {
        &self.config_file.currency
    }

    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "daybook",
///   "config_version": 1,
///   "backup_copies": 5,
///   "currency": "TL"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "daybook"
    app_name: String,

    config_version: u8,

    /// Number of database backups to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,

    #[serde(default = "default_currency")]
    currency: String,
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

fn default_currency() -> String {
    CURRENCY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
            currency: CURRENCY.to_string(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another application.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
