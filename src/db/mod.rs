//! This module is responsible for reading, writing and managing the SQLite database.

mod cash;
mod debts;
mod expenses;
pub(crate) mod migrations;
mod notes;
mod paraniz;
mod products;
mod rows;
mod transformations;

use crate::model::{CashSnapshot, Debt, Entity, Expense, ParanizBatch, ParanizSale, Transformation};
use crate::records::Records;
use crate::{Error, Result};
use anyhow::{anyhow, bail, ensure, Context};
use async_trait::async_trait;
use chrono::NaiveDate;
use rows::date_key;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, SqlitePool};
use std::path::Path;
use tracing::debug;

/// A handle to the SQLite database. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub(crate) struct Db {
    pool: SqlitePool,
}

/// Restricts a listing to records on a date or within an inclusive date range.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum DateFilter {
    #[default]
    All,
    On(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

impl DateFilter {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::On(day) => *day == date,
            DateFilter::Between(start, end) => *start <= date && date <= *end,
        }
    }

    /// The SQL `WHERE` clause for this filter and the values to bind to it.
    fn clause(&self) -> (&'static str, Vec<String>) {
        match self {
            DateFilter::All => ("", Vec::new()),
            DateFilter::On(date) => ("WHERE date = ?", vec![date_key(*date)]),
            DateFilter::Between(start, end) => (
                "WHERE date BETWEEN ? AND ?",
                vec![date_key(*start), date_key(*end)],
            ),
        }
    }
}

impl Db {
    /// - Validates that no file currently exists at `path`
    /// - Creates a new SQLite file at `path`
    /// - Creates the schema by running all migrations
    pub(crate) async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure!(
            !path.exists(),
            "A database already exists at '{}'",
            path.display()
        );
        let pool = connect(path, true).await?;

        sqlx::query("CREATE TABLE schema_version (version INTEGER NOT NULL)")
            .execute(&pool)
            .await
            .context("Failed to create schema_version table")?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (0)")
            .execute(&pool)
            .await
            .context("Failed to insert initial schema version")?;

        migrations::run(&pool, 0, migrations::latest_version()).await?;
        debug!("Created database at '{}'", path.display());
        Ok(Self { pool })
    }

    /// - Validates that there is a SQLite file at `path`
    /// - Migrates the schema forward if it is out-of-date
    pub(crate) async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure!(
            path.is_file(),
            "The database file is missing '{}'",
            path.display()
        );
        let pool = connect(path, false).await?;

        let current = schema_version(&pool).await?;
        let latest = migrations::latest_version();
        if current > latest {
            bail!(
                "The database schema version {current} is newer than this program supports \
                ({latest})"
            );
        }
        migrations::run(&pool, current, latest).await?;
        Ok(Self { pool })
    }

    pub(crate) async fn schema_version(&self) -> Result<i32> {
        schema_version(&self.pool).await
    }

    /// Deletes the records of `entity` with the given ids in one transaction. If any id does not
    /// exist, nothing is deleted.
    ///
    /// Cash snapshots have no id; use `delete_cash_snapshot`.
    pub(crate) async fn delete_records(&self, entity: Entity, ids: &[String]) -> Result<Vec<String>> {
        ensure!(
            entity != Entity::Cash,
            "Cash snapshots are deleted by date, not by id"
        );
        ensure!(!ids.is_empty(), "At least one id is required");

        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id.as_str()) {
                unique.push(id.as_str());
            }
        }

        let sql = format!("DELETE FROM {} WHERE id = ?", entity.table());
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;
        for id in &unique {
            let result = sqlx::query(&sql)
                .bind(*id)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to delete {} '{id}'", entity.noun(1)))?;
            if result.rows_affected() == 0 {
                // Dropping `tx` rolls back the deletes done so far.
                return Err(not_found(entity, id));
            }
        }
        tx.commit().await.context("Failed to commit transaction")?;

        debug!("Deleted {} {}", unique.len(), entity.noun(unique.len()));
        Ok(unique.into_iter().map(str::to_string).collect())
    }

    async fn fetch_all<R, T>(&self, sql: &str, binds: Vec<String>) -> Result<Vec<T>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
        T: TryFrom<R, Error = Error>,
    {
        let mut query = sqlx::query_as::<_, R>(sql);
        for value in binds {
            query = query.bind(value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Query failed: {sql}"))?;
        rows.into_iter().map(T::try_from).collect()
    }

    async fn fetch_optional<R, T>(&self, sql: &str, key: &str) -> Result<Option<T>>
    where
        R: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
        T: TryFrom<R, Error = Error>,
    {
        sqlx::query_as::<_, R>(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Query failed: {sql}"))?
            .map(T::try_from)
            .transpose()
    }
}

fn not_found(entity: Entity, id: &str) -> Error {
    anyhow!("{} not found: '{id}'", entity.title())
}

async fn connect(path: &Path, create: bool) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(create)
        .journal_mode(SqliteJournalMode::Delete)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .with_context(|| format!("Unable to open SQLite database '{}'", path.display()))
}

async fn schema_version(pool: &SqlitePool) -> Result<i32> {
    let row: (Option<i32>,) = sqlx::query_as("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .context("Failed to read the schema version")?;
    Ok(row.0.unwrap_or(0))
}

#[async_trait]
impl Records for Db {
    async fn get_expenses(&self, date: NaiveDate) -> Result<Vec<Expense>> {
        self.list_expenses(DateFilter::On(date)).await
    }

    async fn get_expenses_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>> {
        self.list_expenses(DateFilter::Between(start, end)).await
    }

    async fn get_transformations(&self, date: NaiveDate) -> Result<Vec<Transformation>> {
        self.list_transformations(DateFilter::On(date)).await
    }

    async fn get_transformations_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transformation>> {
        self.list_transformations(DateFilter::Between(start, end))
            .await
    }

    async fn get_paraniz_sales(&self, date: NaiveDate) -> Result<Vec<ParanizSale>> {
        self.list_paraniz_sales(DateFilter::On(date)).await
    }

    async fn get_paraniz_sales_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ParanizSale>> {
        self.list_paraniz_sales(DateFilter::Between(start, end))
            .await
    }

    async fn get_paraniz_batches(&self, date: NaiveDate) -> Result<Vec<ParanizBatch>> {
        self.list_paraniz_batches(DateFilter::On(date)).await
    }

    async fn get_cash_snapshot(&self, date: NaiveDate) -> Result<Option<CashSnapshot>> {
        Db::get_cash_snapshot(self, date).await
    }

    async fn get_unpaid_debts(&self) -> Result<Vec<Debt>> {
        self.list_debts(true).await
    }
}
