//! The read side of the datastore as seen by the aggregator.
//!
//! `Records` is the narrow interface that summaries are loaded through. `Db` implements it over
//! SQLite; tests implement it over plain vectors.

use crate::aggregate::{DailyRecords, DailySummary, RangeRecords, RangeSummary};
use crate::model::{CashSnapshot, Debt, Expense, ParanizBatch, ParanizSale, Transformation};
use crate::Result;
use anyhow::ensure;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

#[async_trait]
pub trait Records: Send + Sync {
    async fn get_expenses(&self, date: NaiveDate) -> Result<Vec<Expense>>;

    async fn get_expenses_in_range(&self, start: NaiveDate, end: NaiveDate)
        -> Result<Vec<Expense>>;

    async fn get_transformations(&self, date: NaiveDate) -> Result<Vec<Transformation>>;

    async fn get_transformations_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transformation>>;

    async fn get_paraniz_sales(&self, date: NaiveDate) -> Result<Vec<ParanizSale>>;

    async fn get_paraniz_sales_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ParanizSale>>;

    async fn get_paraniz_batches(&self, date: NaiveDate) -> Result<Vec<ParanizBatch>>;

    /// The snapshot stored for `date`, if any.
    async fn get_cash_snapshot(&self, date: NaiveDate) -> Result<Option<CashSnapshot>>;

    /// Debts with `is_paid = false`, in creation order.
    async fn get_unpaid_debts(&self) -> Result<Vec<Debt>>;
}

/// Fetches everything the dashboard of `date` needs and computes it.
pub async fn load_daily_summary<R>(records: &R, date: NaiveDate) -> Result<DailySummary>
where
    R: Records + ?Sized,
{
    debug!("Loading daily summary for {date}");
    let previous = crate::aggregate::previous_day(date);
    let (expenses, transformations, paraniz_sales, paraniz_batches, snapshot) = tokio::try_join!(
        records.get_expenses(date),
        records.get_transformations(date),
        records.get_paraniz_sales(date),
        records.get_paraniz_batches(date),
        records.get_cash_snapshot(date),
    )?;

    // Yesterday's snapshot is only needed when today's does not carry the value itself.
    let previous_snapshot = match (previous, snapshot.as_ref()) {
        (Some(_), Some(s)) if s.cash_in_box_yesterday.is_some() => None,
        (Some(previous), _) => records.get_cash_snapshot(previous).await?,
        (None, _) => None,
    };

    Ok(DailySummary::compute(&DailyRecords {
        date,
        expenses,
        transformations,
        paraniz_sales,
        paraniz_batches,
        snapshot,
        previous_snapshot,
    }))
}

/// Fetches the records dated within `[start, end]` and computes their totals.
///
/// # Errors
/// - Returns an error if `end` is before `start`.
pub async fn load_range_summary<R>(records: &R, start: NaiveDate, end: NaiveDate) -> Result<RangeSummary>
where
    R: Records + ?Sized,
{
    ensure!(
        start <= end,
        "The range end {end} is before the range start {start}"
    );
    debug!("Loading range summary for {start} to {end}");
    let (expenses, transformations, paraniz_sales) = tokio::try_join!(
        records.get_expenses_in_range(start, end),
        records.get_transformations_in_range(start, end),
        records.get_paraniz_sales_in_range(start, end),
    )?;
    Ok(RangeSummary::compute(&RangeRecords {
        start,
        end,
        expenses,
        transformations,
        paraniz_sales,
    }))
}
