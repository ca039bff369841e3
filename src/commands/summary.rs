//! Summary command handlers: the end-of-day dashboard and range totals.

use crate::aggregate::{DailySummary, ParanizTotals, RangeSummary};
use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::db::DateFilter;
use crate::error::{ErrorType, IntoResult};
use crate::model::Amount;
use crate::records::{load_daily_summary, load_range_summary};
use crate::utils::today;
use crate::{Config, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    Daily(DailySummary),
    Range(RangeSummary),
}

/// Runs `daily_summary` for `--date` (default today) or `range_summary` for `--from`/`--to`.
pub async fn summary(config: Config, args: SummaryArgs) -> Result<Out<Summary>> {
    match args.range.filter().pub_result(ErrorType::Request)? {
        DateFilter::All => Ok(daily_summary(config, today()).await?.map(Summary::Daily)),
        DateFilter::On(date) => Ok(daily_summary(config, date).await?.map(Summary::Daily)),
        DateFilter::Between(from, to) => {
            Ok(range_summary(config, from, to).await?.map(Summary::Range))
        }
    }
}

/// Computes the dashboard of `date` and renders it as text.
pub async fn daily_summary(config: Config, date: NaiveDate) -> Result<Out<DailySummary>> {
    let summary = load_daily_summary(config.db(), date)
        .await
        .pub_result(ErrorType::Database)?;
    let message = render_daily(&summary, config.currency());
    Ok(Out::new(message, summary))
}

/// Computes the totals of the records dated from `from` to `to`, both inclusive.
///
/// # Errors
///
/// - Returns an error if `to` is before `from`.
/// - Returns an error if a database operation fails.
pub async fn range_summary(config: Config, from: NaiveDate, to: NaiveDate) -> Result<Out<RangeSummary>> {
    if to < from {
        return Err(anyhow::anyhow!(
            "The range end {to} is before the range start {from}"
        ))
        .pub_result(ErrorType::Request);
    }
    let summary = load_range_summary(config.db(), from, to)
        .await
        .pub_result(ErrorType::Database)?;
    let message = render_range(&summary, config.currency());
    Ok(Out::new(message, summary))
}

struct Dashboard<'a> {
    text: String,
    currency: &'a str,
}

impl<'a> Dashboard<'a> {
    fn new(title: String, currency: &'a str) -> Self {
        Self {
            text: title,
            currency,
        }
    }

    fn money(&mut self, label: &str, value: Decimal) {
        self.line(label, &format!("{} {}", Amount::new(value), self.currency));
    }

    fn line(&mut self, label: &str, value: &str) {
        self.text.push_str(&format!("\n  {label:<30}{value:>18}"));
    }

    fn finish(self) -> String {
        self.text
    }
}

fn render_daily(s: &DailySummary, currency: &str) -> String {
    let mut d = Dashboard::new(format!("Daybook for {}", s.date), currency);
    d.money("Expenses", s.total_expenses);
    d.money("Transformation sales", s.transformations.total_selling_price);
    d.line(
        "Transformation cost",
        &format!("$ {}", Amount::new(s.transformations.total_cost_price_in_dollar)),
    );
    match s.cost_in_local_currency {
        Some(cost) => {
            d.money("Cost in local currency", cost);
            d.line("Dollar rate", &Amount::new(s.dollar_to_tl_rate).to_string());
        }
        None => d.line("Cost in local currency", "no dollar rate"),
    }
    d.money("Paraniz sales", s.total_paraniz_sales);
    d.money("  fatura", s.total_fatura_sales);
    d.money("  kontor", s.total_kontor_sales);
    if s.paraniz != ParanizTotals::default() {
        d.money("Kontor batches", s.paraniz.total_kontor_amount);
        d.money("  cost", s.paraniz.total_kontor_cost);
        d.money("Fatura batches", s.paraniz.total_fatura_amount);
        d.money("  cost", s.paraniz.total_fatura_cost);
    }
    d.money("Net total", s.net_total);
    d.money("Cash yesterday", s.cash_in_box_yesterday);
    d.money("Net with cash and expenses", s.net_total_with_cash_and_expenses);
    if s.cash_counted {
        d.money("Cash today", s.cash_in_box_today);
        let verdict = if s.cash_difference.is_excess() {
            " (excess)"
        } else if s.cash_difference.is_shortage() {
            " (shortage)"
        } else {
            ""
        };
        d.line(
            "Difference",
            &format!("{} {currency}{verdict}", s.cash_difference),
        );
    } else {
        d.line("Cash today", "not counted yet");
    }
    d.finish()
}

fn render_range(s: &RangeSummary, currency: &str) -> String {
    let mut d = Dashboard::new(format!("Daybook from {} to {}", s.start, s.end), currency);
    d.money("Expenses", s.total_expenses);
    d.money("Transformation sales", s.transformations.total_selling_price);
    d.line(
        "Transformation cost",
        &format!("$ {}", Amount::new(s.transformations.total_cost_price_in_dollar)),
    );
    d.money("Paraniz sales", s.total_paraniz_sales);
    d.money("  fatura", s.total_fatura_sales);
    d.money("  kontor", s.total_kontor_sales);
    d.money("Net total", s.net_total);
    d.finish()
}
