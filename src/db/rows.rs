//! Row types as stored in SQLite and their mapping into the domain model.
//!
//! Numbers are stored as text. When read back they go through `coerce`, so a NULL or a value that
//! does not parse becomes zero. A date that does not parse is an error, since a record without a
//! date cannot be placed in any summary.

use crate::model::{
    coerce, CashSnapshot, Debt, Entity, Expense, Note, ParanizBatch, ParanizCategory, ParanizSale,
    Product, Transformation,
};
use crate::{Error, Result};
use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The stored form of a date, `YYYY-MM-DD`, which sorts and compares correctly as text.
pub(super) fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The stored form of a number.
pub(super) fn decimal_text(value: Decimal) -> String {
    value.to_string()
}

fn parse_date(value: &str, entity: Entity, id: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .with_context(|| format!("{} '{id}' has an invalid date '{value}'", entity.title()))
}

fn number(value: Option<String>) -> Decimal {
    coerce(value)
}

pub(super) const CASH_COLUMNS: &str =
    "date, cash_in_box_yesterday, cash_in_box_today, dollar_to_tl_rate";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct CashSnapshotRow {
    pub(super) date: String,
    pub(super) cash_in_box_yesterday: Option<String>,
    pub(super) cash_in_box_today: Option<String>,
    pub(super) dollar_to_tl_rate: Option<String>,
}

impl TryFrom<CashSnapshotRow> for CashSnapshot {
    type Error = Error;

    fn try_from(row: CashSnapshotRow) -> Result<Self> {
        Ok(CashSnapshot {
            date: parse_date(&row.date, Entity::Cash, &row.date)?,
            cash_in_box_yesterday: row.cash_in_box_yesterday.map(coerce),
            cash_in_box_today: number(row.cash_in_box_today),
            dollar_to_tl_rate: number(row.dollar_to_tl_rate),
        })
    }
}

pub(super) const EXPENSE_COLUMNS: &str = "id, date, name, amount";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct ExpenseRow {
    pub(super) id: String,
    pub(super) date: String,
    pub(super) name: String,
    pub(super) amount: Option<String>,
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = Error;

    fn try_from(row: ExpenseRow) -> Result<Self> {
        Ok(Expense {
            date: parse_date(&row.date, Entity::Expense, &row.id)?,
            id: row.id,
            name: row.name,
            amount: number(row.amount),
        })
    }
}

pub(super) const TRANSFORMATION_COLUMNS: &str =
    "id, date, name, quantity, product_cost, selling_price, is_net_profit";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct TransformationRow {
    pub(super) id: String,
    pub(super) date: String,
    pub(super) name: String,
    pub(super) quantity: Option<String>,
    pub(super) product_cost: Option<String>,
    pub(super) selling_price: Option<String>,
    pub(super) is_net_profit: bool,
}

impl TryFrom<TransformationRow> for Transformation {
    type Error = Error;

    fn try_from(row: TransformationRow) -> Result<Self> {
        Ok(Transformation {
            date: parse_date(&row.date, Entity::Transformation, &row.id)?,
            id: row.id,
            name: row.name,
            quantity: number(row.quantity),
            product_cost: number(row.product_cost),
            selling_price: number(row.selling_price),
            is_net_profit: row.is_net_profit,
        })
    }
}

pub(super) const PARANIZ_SALE_COLUMNS: &str =
    "id, date, name, amount, cost, category, subscription_number";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct ParanizSaleRow {
    pub(super) id: String,
    pub(super) date: String,
    pub(super) name: String,
    pub(super) amount: Option<String>,
    pub(super) cost: Option<String>,
    pub(super) category: String,
    pub(super) subscription_number: String,
}

impl TryFrom<ParanizSaleRow> for ParanizSale {
    type Error = Error;

    fn try_from(row: ParanizSaleRow) -> Result<Self> {
        let category = ParanizCategory::parse(&row.category)
            .with_context(|| format!("Paraniz sale '{}' has an invalid category", row.id))?;
        Ok(ParanizSale {
            date: parse_date(&row.date, Entity::ParanizSale, &row.id)?,
            id: row.id,
            name: row.name,
            amount: number(row.amount),
            cost: number(row.cost),
            category,
            subscription_number: row.subscription_number,
        })
    }
}

pub(super) const PARANIZ_BATCH_COLUMNS: &str =
    "id, date, kontor_amount, kontor_cost, fatura_amount, fatura_cost";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct ParanizBatchRow {
    pub(super) id: String,
    pub(super) date: String,
    pub(super) kontor_amount: Option<String>,
    pub(super) kontor_cost: Option<String>,
    pub(super) fatura_amount: Option<String>,
    pub(super) fatura_cost: Option<String>,
}

impl TryFrom<ParanizBatchRow> for ParanizBatch {
    type Error = Error;

    fn try_from(row: ParanizBatchRow) -> Result<Self> {
        Ok(ParanizBatch {
            date: parse_date(&row.date, Entity::Paraniz, &row.id)?,
            id: row.id,
            kontor_amount: number(row.kontor_amount),
            kontor_cost: number(row.kontor_cost),
            fatura_amount: number(row.fatura_amount),
            fatura_cost: number(row.fatura_cost),
        })
    }
}

pub(super) const DEBT_COLUMNS: &str =
    "id, date, customer_name, product_name, product_cost, amount, is_paid";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct DebtRow {
    pub(super) id: String,
    pub(super) date: String,
    pub(super) customer_name: String,
    pub(super) product_name: String,
    pub(super) product_cost: Option<String>,
    pub(super) amount: Option<String>,
    pub(super) is_paid: bool,
}

impl TryFrom<DebtRow> for Debt {
    type Error = Error;

    fn try_from(row: DebtRow) -> Result<Self> {
        Ok(Debt {
            date: parse_date(&row.date, Entity::Debt, &row.id)?,
            id: row.id,
            customer_name: row.customer_name,
            product_name: row.product_name,
            product_cost: number(row.product_cost),
            amount: number(row.amount),
            is_paid: row.is_paid,
        })
    }
}

pub(super) const PRODUCT_COLUMNS: &str = "id, name, quantity, cost, price";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct ProductRow {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) quantity: Option<String>,
    pub(super) cost: Option<String>,
    pub(super) price: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = Error;

    fn try_from(row: ProductRow) -> Result<Self> {
        Ok(Product {
            id: row.id,
            name: row.name,
            quantity: number(row.quantity),
            cost: number(row.cost),
            price: number(row.price),
        })
    }
}

pub(super) const NOTE_COLUMNS: &str = "id, date, title, content";

#[derive(Debug, Clone, sqlx::FromRow)]
pub(super) struct NoteRow {
    pub(super) id: String,
    pub(super) date: String,
    pub(super) title: String,
    pub(super) content: String,
}

impl TryFrom<NoteRow> for Note {
    type Error = Error;

    fn try_from(row: NoteRow) -> Result<Self> {
        Ok(Note {
            date: parse_date(&row.date, Entity::Note, &row.id)?,
            id: row.id,
            title: row.title,
            content: row.content,
        })
    }
}
