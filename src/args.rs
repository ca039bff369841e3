//! These structs provide the CLI interface for the daybook CLI.

use crate::db::DateFilter;
use crate::model::{Amount, Entity, ParanizCategory};
use crate::Result;
use anyhow::{bail, ensure};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// daybook: A daily cash book for a small shop.
///
/// Record expenses, product sales, paraniz (bill payment and prepaid credit) sales, customer debts
/// and the cash counted in the till. At the end of the day, `daybook summary` reconciles the
/// counted cash against what the records say should be there.
///
/// There is also a mode in which an AI agent can read the book through the mcp subcommand.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory, the configuration file and the database.
    ///
    /// This is the first command to run. By default the data lives in $HOME/daybook; pass
    /// --daybook-home or set DAYBOOK_HOME to put it somewhere else.
    Init,
    /// Add a record. For cash, this sets the counted cash of a date.
    Insert(InsertArgs),
    /// Change fields of an existing record. Fields that are not given stay as they are.
    Update(UpdateArgs),
    /// Delete one or more records. A backup of the database is taken first.
    Delete(DeleteArgs),
    /// List records of one kind.
    List(ListArgs),
    /// Show the end-of-day dashboard for a date, or totals for a date range.
    Summary(SummaryArgs),
    /// Show the debts that have not been paid.
    Debts,
    /// Mark a debt as paid (or, with --unpaid, as not paid).
    Pay(PayArgs),
    /// Write records to a CSV file.
    Export(ExportArgs),
    /// Copy the database into the backups directory.
    Backup,
    /// Run as an MCP server over stdio so that an AI agent can use the book.
    Mcp,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the daybook data and configuration is held. Defaults to ~/daybook
    #[arg(long, env = "DAYBOOK_HOME", default_value_t = default_daybook_home())]
    daybook_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, daybook_home: PathBuf) -> Self {
        Self {
            log_level,
            daybook_home: daybook_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn daybook_home(&self) -> &DisplayPath {
        &self.daybook_home
    }
}

/// (Not shown): Args for the `daybook insert` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    #[command(subcommand)]
    entity: InsertSubcommand,
}

impl InsertArgs {
    pub fn entity(&self) -> &InsertSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InsertSubcommand {
    /// Set the cash counted in the box. Replaces the given fields of the date's snapshot.
    Cash(InsertCashArgs),
    Expense(InsertExpenseArgs),
    /// A product bought in dollars and sold in TL.
    Transformation(InsertTransformationArgs),
    /// A single paraniz sale (FATURA or KONTOR).
    ParanizSale(InsertParanizSaleArgs),
    /// A kontor/fatura breakdown record.
    Paraniz(InsertParanizBatchArgs),
    Debt(InsertDebtArgs),
    Product(InsertProductArgs),
    Note(InsertNoteArgs),
}

/// Amounts accept thousands separators and currency signs, e.g. `1,250.50`, `₺40`, `40 TL`.
#[derive(Debug, Parser, Clone, Default)]
pub struct InsertCashArgs {
    /// The business date, YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Cash counted in the box at the end of the day.
    #[arg(long)]
    pub today: Option<Amount>,
    /// Cash carried over from the day before. When never given, the previous day's count is used.
    #[arg(long)]
    pub yesterday: Option<Amount>,
    /// TL per dollar.
    #[arg(long)]
    pub rate: Option<Amount>,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertExpenseArgs {
    /// Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub name: String,
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Amount,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertTransformationArgs {
    /// Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "1")]
    pub quantity: Amount,
    /// Cost of one unit, in dollars.
    #[arg(long)]
    pub cost: Amount,
    /// Total received for all units, in TL.
    #[arg(long)]
    pub price: Amount,
    /// The selling price is pure profit.
    #[arg(long)]
    pub net_profit: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertParanizSaleArgs {
    /// Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long)]
    pub amount: Amount,
    #[arg(long, default_value = "0")]
    pub cost: Amount,
    #[arg(long, value_enum)]
    pub category: ParanizCategory,
    #[arg(long, default_value = "")]
    pub subscription: String,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertParanizBatchArgs {
    /// Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, default_value = "0")]
    pub kontor_amount: Amount,
    #[arg(long, default_value = "0")]
    pub kontor_cost: Amount,
    #[arg(long, default_value = "0")]
    pub fatura_amount: Amount,
    #[arg(long, default_value = "0")]
    pub fatura_cost: Amount,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertDebtArgs {
    /// Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub customer: String,
    #[arg(long, default_value = "")]
    pub product: String,
    #[arg(long, default_value = "0")]
    pub product_cost: Amount,
    #[arg(long)]
    pub amount: Amount,
    /// Record the debt as already paid.
    #[arg(long)]
    pub paid: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "0")]
    pub quantity: Amount,
    #[arg(long, default_value = "0")]
    pub cost: Amount,
    #[arg(long, default_value = "0")]
    pub price: Amount,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertNoteArgs {
    /// Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub content: String,
}

/// (Not shown): Args for the `daybook update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    #[command(subcommand)]
    entity: UpdateSubcommand,
}

impl UpdateArgs {
    pub fn entity(&self) -> &UpdateSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UpdateSubcommand {
    Expense(UpdateExpenseArgs),
    Transformation(UpdateTransformationArgs),
    ParanizSale(UpdateParanizSaleArgs),
    Paraniz(UpdateParanizBatchArgs),
    Debt(UpdateDebtArgs),
    Product(UpdateProductArgs),
    Note(UpdateNoteArgs),
}

#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateExpenseArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<Amount>,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateTransformationArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub quantity: Option<Amount>,
    #[arg(long)]
    pub cost: Option<Amount>,
    #[arg(long)]
    pub price: Option<Amount>,
    #[arg(long)]
    pub net_profit: Option<bool>,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateParanizSaleArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub amount: Option<Amount>,
    #[arg(long)]
    pub cost: Option<Amount>,
    #[arg(long, value_enum)]
    pub category: Option<ParanizCategory>,
    #[arg(long)]
    pub subscription: Option<String>,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateParanizBatchArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub kontor_amount: Option<Amount>,
    #[arg(long)]
    pub kontor_cost: Option<Amount>,
    #[arg(long)]
    pub fatura_amount: Option<Amount>,
    #[arg(long)]
    pub fatura_cost: Option<Amount>,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateDebtArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub customer: Option<String>,
    #[arg(long)]
    pub product: Option<String>,
    #[arg(long)]
    pub product_cost: Option<Amount>,
    #[arg(long)]
    pub amount: Option<Amount>,
    #[arg(long)]
    pub paid: Option<bool>,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateProductArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub quantity: Option<Amount>,
    #[arg(long)]
    pub cost: Option<Amount>,
    #[arg(long)]
    pub price: Option<Amount>,
}

#[derive(Debug, Parser, Clone, Default)]
pub struct UpdateNoteArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
}

/// (Not shown): Args for the `daybook delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The kind of record to delete.
    #[arg(value_enum)]
    pub entity: Entity,
    /// The id of a record to delete. Repeat to delete more than one; either all are deleted or
    /// none are.
    #[arg(long = "id")]
    pub ids: Vec<String>,
    /// For cash: the date of the snapshot to delete.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl DeleteArgs {
    pub fn new(entity: Entity, ids: Vec<String>, date: Option<NaiveDate>) -> Self {
        Self { entity, ids, date }
    }
}

/// Selects a single date or an inclusive range. With neither, everything is selected.
#[derive(Debug, Parser, Clone, Default, Eq, PartialEq)]
pub struct DateRangeArgs {
    /// A single date, YYYY-MM-DD.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,
    /// The first date of a range, inclusive.
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,
    /// The last date of a range, inclusive.
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

impl DateRangeArgs {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            date: None,
            from: Some(from),
            to: Some(to),
        }
    }

    /// Validates the combination of arguments and converts it to a `DateFilter`.
    pub fn filter(&self) -> Result<DateFilter> {
        match (self.date, self.from, self.to) {
            (None, None, None) => Ok(DateFilter::All),
            (Some(date), None, None) => Ok(DateFilter::On(date)),
            (None, Some(from), Some(to)) => {
                ensure!(from <= to, "The range end {to} is before the range start {from}");
                Ok(DateFilter::Between(from, to))
            }
            (Some(_), _, _) => bail!("Give either a date or a range, not both"),
            _ => bail!("A range needs both a start (--from) and an end (--to)"),
        }
    }
}

/// (Not shown): Args for the `daybook list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// The kind of record to list.
    #[arg(value_enum)]
    pub entity: Entity,
    #[clap(flatten)]
    pub range: DateRangeArgs,
    /// For debts: only those not yet paid.
    #[arg(long)]
    pub unpaid: bool,
    /// For paraniz sales: only this category.
    #[arg(long, value_enum)]
    pub category: Option<ParanizCategory>,
}

impl ListArgs {
    pub fn new(entity: Entity, range: DateRangeArgs) -> Self {
        Self {
            entity,
            range,
            unpaid: false,
            category: None,
        }
    }
}

/// (Not shown): Args for the `daybook summary` command.
///
/// With --date or nothing, the dashboard of that date (default today). With --from and --to, the
/// totals of the range.
#[derive(Debug, Parser, Clone, Default)]
pub struct SummaryArgs {
    #[clap(flatten)]
    pub range: DateRangeArgs,
}

/// (Not shown): Args for the `daybook pay` command.
#[derive(Debug, Parser, Clone)]
pub struct PayArgs {
    #[arg(long)]
    pub id: String,
    /// Mark the debt as not paid instead.
    #[arg(long)]
    pub unpaid: bool,
}

impl PayArgs {
    pub fn new(id: impl Into<String>, paid: bool) -> Self {
        Self {
            id: id.into(),
            unpaid: !paid,
        }
    }
}

/// (Not shown): Args for the `daybook export` command.
#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    /// The kind of record to export.
    #[arg(value_enum)]
    pub entity: Entity,
    #[clap(flatten)]
    pub range: DateRangeArgs,
    /// The CSV file to write. It is overwritten if it exists.
    #[arg(long)]
    pub file: PathBuf,
}

fn default_daybook_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("daybook"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --daybook-home or DAYBOOK_HOME instead of relying on the default \
                daybook home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("daybook")
        }
    })
}

/// A `PathBuf` that implements `Display` so that it can be used as a clap default value.
#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl FromStr for DisplayPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(DisplayPath(PathBuf::from(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Args {
        let mut full = vec!["daybook", "--daybook-home", "/tmp/daybook-test"];
        full.extend_from_slice(args);
        Args::try_parse_from(full).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        <Args as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_parse_insert_expense() {
        let args = parse(&[
            "insert", "expense", "--date", "2024-05-10", "--name", "rent", "--amount", "₺1,250.50",
        ]);
        let Command::Insert(insert) = args.command() else {
            panic!("expected insert");
        };
        let InsertSubcommand::Expense(expense) = insert.entity() else {
            panic!("expected expense");
        };
        assert_eq!(expense.date, Some(date("2024-05-10")));
        assert_eq!(expense.amount.value(), dec!(1250.50));
        assert_eq!(args.common().daybook_home().path(), Path::new("/tmp/daybook-test"));
    }

    #[test]
    fn test_parse_insert_paraniz_sale_category() {
        let args = parse(&[
            "insert",
            "paraniz-sale",
            "--amount",
            "100",
            "--category",
            "kontor",
        ]);
        let Command::Insert(insert) = args.command() else {
            panic!("expected insert");
        };
        let InsertSubcommand::ParanizSale(sale) = insert.entity() else {
            panic!("expected paraniz-sale");
        };
        assert_eq!(sale.category, ParanizCategory::Kontor);
        assert!(sale.cost.is_zero());
    }

    #[test]
    fn test_parse_delete_many_ids() {
        let args = parse(&["delete", "expense", "--id", "a", "--id", "b"]);
        let Command::Delete(delete) = args.command() else {
            panic!("expected delete");
        };
        assert_eq!(delete.entity, Entity::Expense);
        assert_eq!(delete.ids, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_summary_range() {
        let args = parse(&["summary", "--from", "2024-05-01", "--to", "2024-05-31"]);
        let Command::Summary(summary) = args.command() else {
            panic!("expected summary");
        };
        assert_eq!(
            summary.range.filter().unwrap(),
            DateFilter::Between(date("2024-05-01"), date("2024-05-31"))
        );
    }

    #[test]
    fn test_parse_rejects_date_with_range() {
        let result = Args::try_parse_from([
            "daybook", "list", "expense", "--date", "2024-05-01", "--from", "2024-05-01", "--to",
            "2024-05-02",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        let result = Args::try_parse_from([
            "daybook", "insert", "expense", "--name", "x", "--amount", "twelve",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_date_range_filter() {
        assert_eq!(DateRangeArgs::default().filter().unwrap(), DateFilter::All);
        assert_eq!(
            DateRangeArgs::on(date("2024-02-29")).filter().unwrap(),
            DateFilter::On(date("2024-02-29"))
        );
        let err = DateRangeArgs::between(date("2024-05-02"), date("2024-05-01"))
            .filter()
            .unwrap_err();
        assert!(err.to_string().contains("is before the range start"));
        let half = DateRangeArgs {
            from: Some(date("2024-05-01")),
            ..Default::default()
        };
        assert!(half.filter().is_err());
    }
}
