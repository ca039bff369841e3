//! Update command handlers.

use crate::args::{
    UpdateDebtArgs, UpdateExpenseArgs, UpdateNoteArgs, UpdateParanizBatchArgs,
    UpdateParanizSaleArgs, UpdateProductArgs, UpdateTransformationArgs,
};
use crate::commands::{require, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::{
    Amount, Debt, DebtUpdates, Entity, Expense, ExpenseUpdates, Note, NoteUpdates, ParanizBatch,
    ParanizBatchUpdates, ParanizSale, ParanizSaleUpdates, Product, ProductUpdates,
    Transformation, TransformationUpdates,
};
use crate::{Config, Result};
use rust_decimal::Decimal;

/// Updates an expense by ID. Only the given fields change.
///
/// # Errors
///
/// - Returns an error if the expense is not found.
/// - Returns an error if a database operation fails.
pub async fn update_expense(config: Config, args: UpdateExpenseArgs) -> Result<Out<Expense>> {
    let updates = ExpenseUpdates {
        date: args.date,
        name: args.name,
        amount: value(args.amount),
    };
    require_any(updates != ExpenseUpdates::default())?;
    let updated = config
        .db()
        .update_expense(&args.id, &updates)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(updated_out(Entity::Expense, &args.id, updated))
}

pub async fn update_transformation(
    config: Config,
    args: UpdateTransformationArgs,
) -> Result<Out<Transformation>> {
    let updates = TransformationUpdates {
        date: args.date,
        name: args.name,
        quantity: value(args.quantity),
        product_cost: value(args.cost),
        selling_price: value(args.price),
        is_net_profit: args.net_profit,
    };
    require_any(updates != TransformationUpdates::default())?;
    let updated = config
        .db()
        .update_transformation(&args.id, &updates)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(updated_out(Entity::Transformation, &args.id, updated))
}

pub async fn update_paraniz_sale(
    config: Config,
    args: UpdateParanizSaleArgs,
) -> Result<Out<ParanizSale>> {
    let updates = ParanizSaleUpdates {
        date: args.date,
        name: args.name,
        amount: value(args.amount),
        cost: value(args.cost),
        category: args.category,
        subscription_number: args.subscription,
    };
    require_any(updates != ParanizSaleUpdates::default())?;
    let updated = config
        .db()
        .update_paraniz_sale(&args.id, &updates)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(updated_out(Entity::ParanizSale, &args.id, updated))
}

pub async fn update_paraniz_batch(
    config: Config,
    args: UpdateParanizBatchArgs,
) -> Result<Out<ParanizBatch>> {
    let updates = ParanizBatchUpdates {
        date: args.date,
        kontor_amount: value(args.kontor_amount),
        kontor_cost: value(args.kontor_cost),
        fatura_amount: value(args.fatura_amount),
        fatura_cost: value(args.fatura_cost),
    };
    require_any(updates != ParanizBatchUpdates::default())?;
    let updated = config
        .db()
        .update_paraniz_batch(&args.id, &updates)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(updated_out(Entity::Paraniz, &args.id, updated))
}

pub async fn update_debt(config: Config, args: UpdateDebtArgs) -> Result<Out<Debt>> {
    let updates = DebtUpdates {
        date: args.date,
        customer_name: args.customer,
        product_name: args.product,
        product_cost: value(args.product_cost),
        amount: value(args.amount),
        is_paid: args.paid,
    };
    require_any(updates != DebtUpdates::default())?;
    let updated = config
        .db()
        .update_debt(&args.id, &updates)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(updated_out(Entity::Debt, &args.id, updated))
}

pub async fn update_product(config: Config, args: UpdateProductArgs) -> Result<Out<Product>> {
    let updates = ProductUpdates {
        name: args.name,
        quantity: value(args.quantity),
        cost: value(args.cost),
        price: value(args.price),
    };
    require_any(updates != ProductUpdates::default())?;
    let updated = config
        .db()
        .update_product(&args.id, &updates)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(updated_out(Entity::Product, &args.id, updated))
}

pub async fn update_note(config: Config, args: UpdateNoteArgs) -> Result<Out<Note>> {
    let updates = NoteUpdates {
        date: args.date,
        title: args.title,
        content: args.content,
    };
    require_any(updates != NoteUpdates::default())?;
    let updated = config
        .db()
        .update_note(&args.id, &updates)
        .await
        .pub_result(ErrorType::Database)?;
    Ok(updated_out(Entity::Note, &args.id, updated))
}

fn value(amount: Option<Amount>) -> Option<Decimal> {
    amount.map(|a| a.value())
}

fn require_any(has_changes: bool) -> Result<()> {
    require(has_changes, "Nothing to update, give at least one field to change")
}

fn updated_out<T>(entity: Entity, id: &str, record: T) -> Out<T>
where
    T: serde::Serialize + Clone + std::fmt::Debug,
{
    Out::new(format!("Updated {} with ID: {id}", entity.noun(1)), record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{date, TestEnv};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_update_expense_partial() {
        let env = TestEnv::new().await;
        env.insert_test_day().await;
        let expenses = env
            .config()
            .db()
            .list_expenses(crate::db::DateFilter::All)
            .await
            .unwrap();
        let rent = &expenses[0];

        let out = update_expense(
            env.config(),
            UpdateExpenseArgs {
                id: rent.id.clone(),
                amount: Some(Amount::new(dec!(35))),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let updated = out.structure().unwrap();
        assert_eq!(updated.amount, dec!(35));
        assert_eq!(updated.name, rent.name);
        assert_eq!(updated.date, rent.date);
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let env = TestEnv::new().await;
        let err = update_note(
            env.config(),
            UpdateNoteArgs {
                id: "nope".to_string(),
                title: Some("x".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err
            .to_string()
            .contains("Database error: Note not found: 'nope'"));
    }

    #[tokio::test]
    async fn test_update_without_fields() {
        let env = TestEnv::new().await;
        let err = update_product(
            env.config(),
            UpdateProductArgs {
                id: "any".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[tokio::test]
    async fn test_update_debt_moves_date_and_pays() {
        let env = TestEnv::new().await;
        let debt = env.insert_test_debt("Ali", dec!(100), false).await;
        let out = update_debt(
            env.config(),
            UpdateDebtArgs {
                id: debt.id.clone(),
                date: Some(date("2024-06-01")),
                paid: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let updated = out.structure().unwrap();
        assert!(updated.is_paid);
        assert_eq!(updated.date, date("2024-06-01"));
        assert_eq!(updated.amount, dec!(100));
    }
}
