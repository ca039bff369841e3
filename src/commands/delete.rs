//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::{require, Out};
use crate::error::{ErrorType, IntoResult};
use crate::model::Entity;
use crate::{Config, Result};
use tracing::debug;

/// Deletes one or more records atomically, after copying the database to the backups directory.
///
/// This operation is all-or-nothing: either all specified records are deleted, or none are. If any
/// id is not found, the entire operation is rolled back. Cash snapshots are addressed by `--date`
/// instead of `--id`.
///
/// Returns the ids that were deleted (for cash, the date).
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<Vec<String>>> {
    if args.entity == Entity::Cash {
        require(args.ids.is_empty(), "Cash snapshots are deleted by --date, not --id")?;
        require(
            args.date.is_some(),
            "Give the --date of the cash snapshot to delete",
        )?;
    } else {
        require(!args.ids.is_empty(), "Give at least one --id")?;
        require(
            args.date.is_none(),
            "--date only applies to cash snapshots, use --id",
        )?;
    }

    let backup = config
        .backup()
        .copy_sqlite()
        .await
        .pub_result(ErrorType::Filesystem)?;
    debug!("Backed up before deleting: '{}'", backup.display());

    let deleted = match args.date {
        Some(date) => {
            config
                .db()
                .delete_cash_snapshot(date)
                .await
                .pub_result(ErrorType::Database)?;
            vec![date.to_string()]
        }
        None => config
            .db()
            .delete_records(args.entity, &args.ids)
            .await
            .pub_result(ErrorType::Database)?,
    };

    let count = deleted.len();
    let message = format!("Deleted {count} {}", args.entity.noun(count));
    Ok(Out::new(message, deleted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DateFilter;
    use crate::test::{date, TestEnv};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_delete_debts() {
        let env = TestEnv::new().await;
        let a = env.insert_test_debt("Ali", dec!(100), false).await;
        let b = env.insert_test_debt("Veli", dec!(50), false).await;

        let out = delete(
            env.config(),
            DeleteArgs::new(Entity::Debt, vec![a.id.clone(), b.id.clone()], None),
        )
        .await
        .unwrap();

        assert_eq!(out.message(), "Deleted 2 debts");
        assert_eq!(out.structure().unwrap(), &vec![a.id, b.id]);
        assert!(env.config().db().list_debts(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_takes_backup() {
        let env = TestEnv::new().await;
        let debt = env.insert_test_debt("Ali", dec!(100), false).await;
        delete(env.config(), DeleteArgs::new(Entity::Debt, vec![debt.id], None))
            .await
            .unwrap();
        let backups = std::fs::read_dir(env.config().backups()).unwrap().count();
        assert_eq!(backups, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_rolls_back() {
        let env = TestEnv::new().await;
        let debt = env.insert_test_debt("Ali", dec!(100), false).await;
        let err = delete(
            env.config(),
            DeleteArgs::new(Entity::Debt, vec![debt.id, "gone".to_string()], None),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Debt not found: 'gone'"));
        assert_eq!(env.config().db().list_debts(false).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cash_by_date() {
        let env = TestEnv::new().await;
        let day = env.insert_test_day().await;
        let out = delete(env.config(), DeleteArgs::new(Entity::Cash, vec![], Some(day)))
            .await
            .unwrap();
        assert_eq!(out.message(), "Deleted 1 cash snapshot");
        let left = env
            .config()
            .db()
            .list_cash_snapshots(DateFilter::All)
            .await
            .unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].date, date("2024-05-09"));
    }

    #[tokio::test]
    async fn test_delete_argument_errors() {
        let env = TestEnv::new().await;
        let err = delete(
            env.config(),
            DeleteArgs::new(Entity::Cash, vec!["x".to_string()], None),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Invalid request"));

        let err = delete(env.config(), DeleteArgs::new(Entity::Expense, vec![], None))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Give at least one --id"));
    }
}
