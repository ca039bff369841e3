//! Debt command handlers.

use crate::aggregate::{debt_totals, DebtTotals};
use crate::args::PayArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, Debt};
use crate::records::Records;
use crate::{Config, Result};
use serde::Serialize;

/// The open debts and their totals.
#[derive(Debug, Clone, Serialize)]
pub struct DebtReport {
    pub debts: Vec<Debt>,
    #[serde(flatten)]
    pub totals: DebtTotals,
}

/// Lists the debts that have not been paid, oldest first, with their total and count.
pub async fn debts(config: Config) -> Result<Out<DebtReport>> {
    let debts = config
        .db()
        .get_unpaid_debts()
        .await
        .pub_result(ErrorType::Database)?;
    let totals = debt_totals(&debts);

    let mut message = format!(
        "{} unpaid debt{} totalling {} {}",
        totals.unpaid_count,
        if totals.unpaid_count == 1 { "" } else { "s" },
        Amount::new(totals.unpaid_total),
        config.currency()
    );
    for debt in &debts {
        message.push_str(&format!(
            "\n  {}  {}  {}  {}  {}",
            debt.date,
            debt.id,
            debt.customer_name,
            debt.product_name,
            Amount::new(debt.amount)
        ));
    }
    Ok(Out::new(message, DebtReport { debts, totals }))
}

/// Marks a debt as paid, or as unpaid when `--unpaid` is given.
pub async fn pay(config: Config, args: PayArgs) -> Result<Out<Debt>> {
    let debt = config
        .db()
        .set_debt_paid(&args.id, !args.unpaid)
        .await
        .pub_result(ErrorType::Database)?;
    let message = format!(
        "Marked the debt of {} ({} {}) as {}",
        debt.customer_name,
        Amount::new(debt.amount),
        config.currency(),
        if debt.is_paid { "paid" } else { "unpaid" }
    );
    Ok(Out::new(message, debt))
}
