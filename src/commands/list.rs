//! List command handler and the record listing shared with `export`.

use crate::args::ListArgs;
use crate::commands::{require, Out};
use crate::db::DateFilter;
use crate::error::{ErrorType, IntoResult};
use crate::model::{
    Amount, CashSnapshot, Debt, Entity, Expense, Note, ParanizBatch, ParanizSale, Product,
    Transformation,
};
use crate::{Config, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// The records of one kind, as returned by `list` and written by `export`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "entity", content = "records", rename_all = "kebab-case")]
pub enum Listing {
    Cash(Vec<CashSnapshot>),
    Expense(Vec<Expense>),
    Transformation(Vec<Transformation>),
    ParanizSale(Vec<ParanizSale>),
    Paraniz(Vec<ParanizBatch>),
    Debt(Vec<Debt>),
    Product(Vec<Product>),
    Note(Vec<Note>),
}

impl Listing {
    pub fn entity(&self) -> Entity {
        match self {
            Listing::Cash(_) => Entity::Cash,
            Listing::Expense(_) => Entity::Expense,
            Listing::Transformation(_) => Entity::Transformation,
            Listing::ParanizSale(_) => Entity::ParanizSale,
            Listing::Paraniz(_) => Entity::Paraniz,
            Listing::Debt(_) => Entity::Debt,
            Listing::Product(_) => Entity::Product,
            Listing::Note(_) => Entity::Note,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::Cash(v) => v.len(),
            Listing::Expense(v) => v.len(),
            Listing::Transformation(v) => v.len(),
            Listing::ParanizSale(v) => v.len(),
            Listing::Paraniz(v) => v.len(),
            Listing::Debt(v) => v.len(),
            Listing::Product(v) => v.len(),
            Listing::Note(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One human-readable line per record.
    fn lines(&self) -> Vec<String> {
        match self {
            Listing::Cash(v) => v
                .iter()
                .map(|s| {
                    let yesterday = s
                        .cash_in_box_yesterday
                        .map(|y| money(y).to_string())
                        .unwrap_or_else(|| "-".to_string());
                    format!(
                        "{}  today {}  yesterday {yesterday}  rate {}",
                        s.date,
                        money(s.cash_in_box_today),
                        money(s.dollar_to_tl_rate)
                    )
                })
                .collect(),
            Listing::Expense(v) => v
                .iter()
                .map(|e| format!("{}  {}  {}  {}", e.date, e.id, e.name, money(e.amount)))
                .collect(),
            Listing::Transformation(v) => v
                .iter()
                .map(|t| {
                    format!(
                        "{}  {}  {}  {} x ${}  sold {}{}",
                        t.date,
                        t.id,
                        t.name,
                        t.quantity.normalize(),
                        money(t.product_cost),
                        money(t.selling_price),
                        if t.is_net_profit { "  (net profit)" } else { "" }
                    )
                })
                .collect(),
            Listing::ParanizSale(v) => v
                .iter()
                .map(|s| {
                    format!(
                        "{}  {}  {}  {}  {}  cost {}",
                        s.date,
                        s.id,
                        s.category,
                        s.name,
                        money(s.amount),
                        money(s.cost)
                    )
                })
                .collect(),
            Listing::Paraniz(v) => v
                .iter()
                .map(|b| {
                    format!(
                        "{}  {}  kontor {} (cost {})  fatura {} (cost {})",
                        b.date,
                        b.id,
                        money(b.kontor_amount),
                        money(b.kontor_cost),
                        money(b.fatura_amount),
                        money(b.fatura_cost)
                    )
                })
                .collect(),
            Listing::Debt(v) => v
                .iter()
                .map(|d| {
                    format!(
                        "{}  {}  {}  {}  {}  {}",
                        d.date,
                        d.id,
                        d.customer_name,
                        d.product_name,
                        money(d.amount),
                        if d.is_paid { "paid" } else { "unpaid" }
                    )
                })
                .collect(),
            Listing::Product(v) => v
                .iter()
                .map(|p| {
                    format!(
                        "{}  {}  qty {}  cost {}  price {}",
                        p.id,
                        p.name,
                        p.quantity.normalize(),
                        money(p.cost),
                        money(p.price)
                    )
                })
                .collect(),
            Listing::Note(v) => v
                .iter()
                .map(|n| format!("{}  {}  {}: {}", n.date, n.id, n.title, n.content))
                .collect(),
        }
    }

    /// Writes every record as a CSV row, with a header row named after the fields.
    pub(super) fn write_csv<W: std::io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        fn rows<W: std::io::Write, T: Serialize>(
            writer: &mut csv::Writer<W>,
            records: &[T],
        ) -> Result<()> {
            for record in records {
                writer.serialize(record)?;
            }
            Ok(())
        }
        match self {
            Listing::Cash(v) => rows(writer, v),
            Listing::Expense(v) => rows(writer, v),
            Listing::Transformation(v) => rows(writer, v),
            Listing::ParanizSale(v) => rows(writer, v),
            Listing::Paraniz(v) => rows(writer, v),
            Listing::Debt(v) => rows(writer, v),
            Listing::Product(v) => rows(writer, v),
            Listing::Note(v) => rows(writer, v),
        }
    }
}

/// Lists the records of one kind, optionally restricted to a date or date range.
///
/// Cash snapshots are listed by date; everything else in the order it was entered.
///
/// # Errors
///
/// - Returns an error if a date filter is given for products, which have no date.
/// - Returns an error if `--unpaid` is given for anything but debts, or `--category` for
///   anything but paraniz sales.
/// - Returns an error if a database operation fails.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Listing>> {
    let filter = args.range.filter().pub_result(ErrorType::Request)?;
    require(
        args.category.is_none() || args.entity == Entity::ParanizSale,
        "--category only applies to paraniz sales",
    )?;
    let listing = match (args.category, filter) {
        (Some(category), DateFilter::On(date)) => config
            .db()
            .list_paraniz_sales_by_category(date, category)
            .await
            .map(Listing::ParanizSale)
            .pub_result(ErrorType::Database)?,
        (Some(category), _) => match fetch(&config, args.entity, filter, false).await? {
            Listing::ParanizSale(sales) => Listing::ParanizSale(
                sales
                    .into_iter()
                    .filter(|s| s.category == category)
                    .collect(),
            ),
            other => other,
        },
        (None, _) => fetch(&config, args.entity, filter, args.unpaid).await?,
    };

    let count = listing.len();
    let mut message = format!("Found {count} {}", args.entity.noun(count));
    for line in listing.lines() {
        message.push_str("\n  ");
        message.push_str(&line);
    }
    Ok(Out::new(message, listing))
}

pub(super) async fn fetch(
    config: &Config,
    entity: Entity,
    filter: DateFilter,
    unpaid_only: bool,
) -> Result<Listing> {
    require(
        entity.is_dated() || filter == DateFilter::All,
        "Products have no date, list them without --date, --from or --to",
    )?;
    require(
        !unpaid_only || entity == Entity::Debt,
        "--unpaid only applies to debts",
    )?;

    let db = config.db();
    let listing = match entity {
        Entity::Cash => db.list_cash_snapshots(filter).await.map(Listing::Cash),
        Entity::Expense => db.list_expenses(filter).await.map(Listing::Expense),
        Entity::Transformation => db
            .list_transformations(filter)
            .await
            .map(Listing::Transformation),
        Entity::ParanizSale => db
            .list_paraniz_sales(filter)
            .await
            .map(Listing::ParanizSale),
        Entity::Paraniz => db.list_paraniz_batches(filter).await.map(Listing::Paraniz),
        Entity::Debt => db.list_debts(unpaid_only).await.map(|debts| {
            Listing::Debt(
                debts
                    .into_iter()
                    .filter(|d| filter.contains(d.date))
                    .collect(),
            )
        }),
        Entity::Product => db.list_products().await.map(Listing::Product),
        Entity::Note => db.list_notes(filter).await.map(Listing::Note),
    };
    listing.pub_result(ErrorType::Database)
}

fn money(value: Decimal) -> Amount {
    Amount::new(value)
}
