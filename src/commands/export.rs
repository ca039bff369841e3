//! Export command handler.

use crate::args::ExportArgs;
use crate::commands::list::fetch;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;

/// Where an export was written and how many records it holds.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub file: PathBuf,
    pub rows: usize,
}

/// Writes the records of one kind to a CSV file, one row per record after a header row.
///
/// The file is overwritten if it exists.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<ExportReport>> {
    let filter = args.range.filter().pub_result(ErrorType::Request)?;
    let listing = fetch(&config, args.entity, filter, false).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    listing
        .write_csv(&mut writer)
        .context("Unable to write CSV rows")
        .pub_result(ErrorType::Filesystem)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Unable to finish the CSV output: {}", e.error()))
        .pub_result(ErrorType::Filesystem)?;
    crate::utils::write(&args.file, bytes)
        .await
        .pub_result(ErrorType::Filesystem)?;

    let rows = listing.len();
    let message = format!(
        "Exported {rows} {} to '{}'",
        args.entity.noun(rows),
        args.file.display()
    );
    Ok(Out::new(
        message,
        ExportReport {
            file: args.file,
            rows,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::DateRangeArgs;
    use crate::model::Entity;
    use crate::test::{date, TestEnv};

    fn export_args(env: &TestEnv, entity: Entity, range: DateRangeArgs) -> ExportArgs {
        ExportArgs {
            entity,
            range,
            file: env.config().root().join(format!("{entity}.csv")),
        }
    }

    #[tokio::test]
    async fn test_export_expenses() {
        let env = TestEnv::new().await;
        env.insert_test_day().await;
        let args = export_args(
            &env,
            Entity::Expense,
            DateRangeArgs::between(date("2024-05-01"), date("2024-05-31")),
        );
        let file = args.file.clone();

        let out = export(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().rows, 2);

        let mut reader = csv::Reader::from_path(&file).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["id", "date", "name", "amount"]);
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][1], "2024-05-10");
        assert_eq!(&rows[0][2], "rent");
        assert_eq!(&rows[0][3], "30");
    }

    #[tokio::test]
    async fn test_export_paraniz_sales_category_column() {
        let env = TestEnv::new().await;
        env.insert_test_day().await;
        let args = export_args(&env, Entity::ParanizSale, DateRangeArgs::default());
        let file = args.file.clone();
        export(env.config(), args).await.unwrap();

        let content = std::fs::read_to_string(file).unwrap();
        assert!(content.starts_with("id,date,name,amount,cost,category,subscription_number"));
        assert!(content.contains(",KONTOR,5551234567"));
    }

    #[tokio::test]
    async fn test_export_empty_range_writes_nothing_but_succeeds() {
        let env = TestEnv::new().await;
        let args = export_args(
            &env,
            Entity::Transformation,
            DateRangeArgs::on(date("2024-01-01")),
        );
        let out = export(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().rows, 0);
        assert_eq!(out.message().split(' ').nth(1), Some("0"));
    }
}
