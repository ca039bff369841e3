//! Insert command handlers.
//!
//! Every record except a cash snapshot gets a freshly generated id, which is reported in the
//! message. Records without an explicit date are dated today on the local clock.

use crate::args::{
    InsertCashArgs, InsertDebtArgs, InsertExpenseArgs, InsertNoteArgs, InsertParanizBatchArgs,
    InsertParanizSaleArgs, InsertProductArgs, InsertTransformationArgs,
};
use crate::commands::{require, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{
    CashSnapshot, Debt, Entity, Expense, Note, ParanizBatch, ParanizSale, Product, Transformation,
};
use crate::utils::{generate_id, today};
use crate::{Config, Result};
use rust_decimal::Decimal;

/// Sets the counted cash of a date.
///
/// There is one snapshot per date. Fields that are given replace the stored ones; fields that are
/// not given keep their stored value, or start at zero for a new snapshot. `cash_in_box_yesterday`
/// stays unset until it is given, so that the summary can fall back to the previous day's count.
///
/// # Errors
///
/// - Returns an error if none of the cash fields are given.
/// - Returns an error if a database operation fails.
pub async fn insert_cash(config: Config, args: InsertCashArgs) -> Result<Out<CashSnapshot>> {
    require(
        args.today.is_some() || args.yesterday.is_some() || args.rate.is_some(),
        "Nothing to save, give --today, --yesterday or --rate",
    )?;
    let date = args.date.unwrap_or_else(today);
    let db = config.db();
    let mut snapshot = db
        .get_cash_snapshot(date)
        .await
        .pub_result(ErrorType::Database)?
        .unwrap_or_else(|| CashSnapshot::new(date, Decimal::ZERO));

    if let Some(amount) = args.today {
        snapshot.cash_in_box_today = amount.value();
    }
    if let Some(amount) = args.yesterday {
        snapshot.cash_in_box_yesterday = Some(amount.value());
    }
    if let Some(rate) = args.rate {
        snapshot.dollar_to_tl_rate = rate.value();
    }

    db.upsert_cash_snapshot(&snapshot)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(Out::new(format!("Saved the cash snapshot for {date}"), snapshot))
}

pub async fn insert_expense(config: Config, args: InsertExpenseArgs) -> Result<Out<Expense>> {
    require(!args.name.trim().is_empty(), "An expense needs a name")?;
    let expense = Expense {
        id: generate_id(),
        date: args.date.unwrap_or_else(today),
        name: args.name,
        amount: args.amount.value(),
    };
    config
        .db()
        .insert_expense(&expense)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(inserted(Entity::Expense, expense.id.clone(), expense))
}

pub async fn insert_transformation(
    config: Config,
    args: InsertTransformationArgs,
) -> Result<Out<Transformation>> {
    require(!args.name.trim().is_empty(), "A transformation needs a name")?;
    let transformation = Transformation {
        id: generate_id(),
        date: args.date.unwrap_or_else(today),
        name: args.name,
        quantity: args.quantity.value(),
        product_cost: args.cost.value(),
        selling_price: args.price.value(),
        is_net_profit: args.net_profit,
    };
    config
        .db()
        .insert_transformation(&transformation)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(inserted(
        Entity::Transformation,
        transformation.id.clone(),
        transformation,
    ))
}

pub async fn insert_paraniz_sale(
    config: Config,
    args: InsertParanizSaleArgs,
) -> Result<Out<ParanizSale>> {
    let sale = ParanizSale {
        id: generate_id(),
        date: args.date.unwrap_or_else(today),
        name: args.name,
        amount: args.amount.value(),
        cost: args.cost.value(),
        category: args.category,
        subscription_number: args.subscription,
    };
    config
        .db()
        .insert_paraniz_sale(&sale)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(inserted(Entity::ParanizSale, sale.id.clone(), sale))
}

pub async fn insert_paraniz_batch(
    config: Config,
    args: InsertParanizBatchArgs,
) -> Result<Out<ParanizBatch>> {
    let batch = ParanizBatch {
        id: generate_id(),
        date: args.date.unwrap_or_else(today),
        kontor_amount: args.kontor_amount.value(),
        kontor_cost: args.kontor_cost.value(),
        fatura_amount: args.fatura_amount.value(),
        fatura_cost: args.fatura_cost.value(),
    };
    config
        .db()
        .insert_paraniz_batch(&batch)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(inserted(Entity::Paraniz, batch.id.clone(), batch))
}

pub async fn insert_debt(config: Config, args: InsertDebtArgs) -> Result<Out<Debt>> {
    require(!args.customer.trim().is_empty(), "A debt needs a customer name")?;
    let debt = Debt {
        id: generate_id(),
        date: args.date.unwrap_or_else(today),
        customer_name: args.customer,
        product_name: args.product,
        product_cost: args.product_cost.value(),
        amount: args.amount.value(),
        is_paid: args.paid,
    };
    config
        .db()
        .insert_debt(&debt)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(inserted(Entity::Debt, debt.id.clone(), debt))
}

pub async fn insert_product(config: Config, args: InsertProductArgs) -> Result<Out<Product>> {
    require(!args.name.trim().is_empty(), "A product needs a name")?;
    let product = Product {
        id: generate_id(),
        name: args.name,
        quantity: args.quantity.value(),
        cost: args.cost.value(),
        price: args.price.value(),
    };
    config
        .db()
        .insert_product(&product)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(inserted(Entity::Product, product.id.clone(), product))
}

pub async fn insert_note(config: Config, args: InsertNoteArgs) -> Result<Out<Note>> {
    require(!args.title.trim().is_empty(), "A note needs a title")?;
    let note = Note {
        id: generate_id(),
        date: args.date.unwrap_or_else(today),
        title: args.title,
        content: args.content,
    };
    config
        .db()
        .insert_note(&note)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(inserted(Entity::Note, note.id.clone(), note))
}

fn inserted<T>(entity: Entity, id: String, record: T) -> Out<T>
where
    T: serde::Serialize + Clone + std::fmt::Debug,
{
    Out::new(format!("Inserted {} with ID: {id}", entity.noun(1)), record)
}
