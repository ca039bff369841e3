use clap::Parser;
use daybook::args::{Args, Command, InsertSubcommand, UpdateSubcommand};
use daybook::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().daybook_home().path();

    let load = || Config::load(home);

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Insert(insert_args) => match insert_args.entity() {
            InsertSubcommand::Cash(args) => {
                commands::insert_cash(load().await?, args.clone()).await?.print()
            }
            InsertSubcommand::Expense(args) => {
                commands::insert_expense(load().await?, args.clone()).await?.print()
            }
            InsertSubcommand::Transformation(args) => {
                commands::insert_transformation(load().await?, args.clone())
                    .await?
                    .print()
            }
            InsertSubcommand::ParanizSale(args) => {
                commands::insert_paraniz_sale(load().await?, args.clone())
                    .await?
                    .print()
            }
            InsertSubcommand::Paraniz(args) => {
                commands::insert_paraniz_batch(load().await?, args.clone())
                    .await?
                    .print()
            }
            InsertSubcommand::Debt(args) => {
                commands::insert_debt(load().await?, args.clone()).await?.print()
            }
            InsertSubcommand::Product(args) => {
                commands::insert_product(load().await?, args.clone()).await?.print()
            }
            InsertSubcommand::Note(args) => {
                commands::insert_note(load().await?, args.clone()).await?.print()
            }
        },

        Command::Update(update_args) => match update_args.entity() {
            UpdateSubcommand::Expense(args) => {
                commands::update_expense(load().await?, args.clone()).await?.print()
            }
            UpdateSubcommand::Transformation(args) => {
                commands::update_transformation(load().await?, args.clone())
                    .await?
                    .print()
            }
            UpdateSubcommand::ParanizSale(args) => {
                commands::update_paraniz_sale(load().await?, args.clone())
                    .await?
                    .print()
            }
            UpdateSubcommand::Paraniz(args) => {
                commands::update_paraniz_batch(load().await?, args.clone())
                    .await?
                    .print()
            }
            UpdateSubcommand::Debt(args) => {
                commands::update_debt(load().await?, args.clone()).await?.print()
            }
            UpdateSubcommand::Product(args) => {
                commands::update_product(load().await?, args.clone()).await?.print()
            }
            UpdateSubcommand::Note(args) => {
                commands::update_note(load().await?, args.clone()).await?.print()
            }
        },

        Command::Delete(delete_args) => commands::delete(load().await?, delete_args.clone())
            .await?
            .print(),

        Command::List(list_args) => commands::list(load().await?, list_args.clone()).await?.print(),

        Command::Summary(summary_args) => commands::summary(load().await?, summary_args.clone())
            .await?
            .print(),

        Command::Debts => commands::debts(load().await?).await?.print(),

        Command::Pay(pay_args) => commands::pay(load().await?, pay_args.clone()).await?.print(),

        Command::Export(export_args) => commands::export(load().await?, export_args.clone())
            .await?
            .print(),

        Command::Backup => commands::backup(load().await?).await?.print(),

        Command::Mcp => commands::mcp(load().await?).await?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
