//! The MCP tools. Each tool parses its parameters and calls the command handler of the same
//! purpose, so the agent sees the same messages as the CLI user.

use crate::args::{DateRangeArgs, InsertExpenseArgs, ListArgs, PayArgs};
use crate::commands;
use crate::error::{ErrorType, IntoResult};
use crate::mcp::mcp_utils::tool_result;
use crate::mcp::DaybookServer;
use crate::model::{Amount, Entity};
use crate::utils::today;
use anyhow::Context;
use chrono::NaiveDate;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use rmcp::{tool, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;
use std::str::FromStr;
use tracing::info;

/// Parameters for the daily_summary tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "DailySummaryParams")]
pub struct DailySummaryParams {
    /// The business date as YYYY-MM-DD. Defaults to today on the shop's clock.
    #[serde(default)]
    pub date: Option<String>,
}

/// Parameters for the range_summary tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "RangeSummaryParams")]
pub struct RangeSummaryParams {
    /// The first date of the range as YYYY-MM-DD, inclusive.
    pub from: String,
    /// The last date of the range as YYYY-MM-DD, inclusive.
    pub to: String,
}

/// Parameters for the list_records tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "ListRecordsParams")]
pub struct ListRecordsParams {
    /// The kind of record to list.
    pub entity: Entity,
    /// Only records of this date, YYYY-MM-DD. Do not combine with `from`/`to`.
    #[serde(default)]
    pub date: Option<String>,
    /// The first date of a range, YYYY-MM-DD. Requires `to`.
    #[serde(default)]
    pub from: Option<String>,
    /// The last date of a range, YYYY-MM-DD. Requires `from`.
    #[serde(default)]
    pub to: Option<String>,
}

impl ListRecordsParams {
    fn into_args(self) -> crate::Result<ListArgs> {
        let range = DateRangeArgs {
            date: self.date.as_deref().map(parse_date).transpose()?,
            from: self.from.as_deref().map(parse_date).transpose()?,
            to: self.to.as_deref().map(parse_date).transpose()?,
        };
        Ok(ListArgs::new(self.entity, range))
    }
}

/// Parameters for the insert_expense tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "InsertExpenseParams")]
pub struct InsertExpenseParams {
    /// The business date as YYYY-MM-DD. Defaults to today.
    #[serde(default)]
    pub date: Option<String>,
    /// What the money was spent on.
    pub name: String,
    /// The amount in local currency, e.g. "12.50", "1,250" or "₺40".
    pub amount: String,
}

impl InsertExpenseParams {
    fn into_args(self) -> crate::Result<InsertExpenseArgs> {
        let amount = Amount::from_str(&self.amount).pub_result(ErrorType::Request)?;
        Ok(InsertExpenseArgs {
            date: self.date.as_deref().map(parse_date).transpose()?,
            name: self.name,
            amount,
        })
    }
}

/// Parameters for the set_debt_paid tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[schemars(title = "SetDebtPaidParams")]
pub struct SetDebtPaidParams {
    /// The id of the debt.
    pub id: String,
    /// true when the customer has paid, false to reopen the debt.
    pub paid: bool,
}

fn parse_date(value: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("'{value}' is not a date, expected YYYY-MM-DD"))
        .pub_result(ErrorType::Request)
}

#[tool_router(vis = "pub(super)")]
impl DaybookServer {
    #[tool]
    /// Initialize the daybook MCP service for this session and return usage instructions. You
    /// **MUST** call this **ONCE** before using other tools so that you have the full usage
    /// instructions. You **MAY** call it more than once if you have forgotten the usage
    /// instructions.
    async fn initialize_service(&self) -> Result<CallToolResult, McpError> {
        let mut initialized = self.initialized.lock().await;
        *initialized = true;
        Ok(CallToolResult::success(vec![rmcp::model::Content::text(
            include_str!("docs/INSTRUCTIONS.md"),
        )]))
    }

    /// Compute the end-of-day dashboard of one business date.
    ///
    /// Returns the totals of expenses, transformation sales and cost, paraniz sales by category,
    /// the net total, yesterday's cash, today's counted cash and the cash difference. A positive
    /// difference is an excess in the till, a negative one a shortage.
    ///
    /// # Example
    ///
    /// ```json
    /// { "date": "2024-05-10" }
    /// ```
    #[tool]
    async fn daily_summary(
        &self,
        Parameters(params): Parameters<DailySummaryParams>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: daily_summary called with date={:?}", params.date);
        let date = match params.date.as_deref().map(parse_date).transpose() {
            Ok(date) => date.unwrap_or_else(today),
            Err(e) => return tool_result::<()>(Err(e)),
        };
        tool_result(commands::daily_summary(self.config(), date).await)
    }

    /// Compute the totals of expenses, transformations and paraniz sales over an inclusive date
    /// range. Cash reconciliation is per date and is not part of a range summary.
    ///
    /// # Example
    ///
    /// ```json
    /// { "from": "2024-05-01", "to": "2024-05-31" }
    /// ```
    #[tool]
    async fn range_summary(
        &self,
        Parameters(params): Parameters<RangeSummaryParams>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: range_summary called with {} to {}", params.from, params.to);
        let (from, to) = match (parse_date(&params.from), parse_date(&params.to)) {
            (Ok(from), Ok(to)) => (from, to),
            (Err(e), _) | (_, Err(e)) => return tool_result::<()>(Err(e)),
        };
        tool_result(commands::range_summary(self.config(), from, to).await)
    }

    /// List the debts that have not been paid, oldest first, with their total and count.
    #[tool]
    async fn unpaid_debts(&self) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: unpaid_debts called");
        tool_result(commands::debts(self.config()).await)
    }

    /// List the records of one kind: `cash`, `expense`, `transformation`, `paraniz-sale`,
    /// `paraniz`, `debt`, `product` or `note`. Optionally restrict to a `date` or to an inclusive
    /// range given by `from` and `to`. Products have no date and cannot be filtered.
    ///
    /// # Example
    ///
    /// ```json
    /// { "entity": "expense", "from": "2024-05-01", "to": "2024-05-31" }
    /// ```
    #[tool]
    async fn list_records(
        &self,
        Parameters(params): Parameters<ListRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: list_records called for {}", params.entity);
        let args = match params.into_args() {
            Ok(args) => args,
            Err(e) => return tool_result::<()>(Err(e)),
        };
        tool_result(commands::list(self.config(), args).await)
    }

    /// Record an expense paid out of the till. Returns the new expense with its generated id.
    ///
    /// # Example
    ///
    /// ```json
    /// { "date": "2024-05-10", "name": "tea for the shop", "amount": "45.50" }
    /// ```
    #[tool]
    async fn insert_expense(
        &self,
        Parameters(params): Parameters<InsertExpenseParams>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: insert_expense called");
        let args = match params.into_args() {
            Ok(args) => args,
            Err(e) => return tool_result::<()>(Err(e)),
        };
        tool_result(commands::insert_expense(self.config(), args).await)
    }

    /// Mark a debt as paid (`paid: true`) or reopen it (`paid: false`). Use `unpaid_debts` to
    /// find the id.
    #[tool]
    async fn set_debt_paid(
        &self,
        Parameters(params): Parameters<SetDebtPaidParams>,
    ) -> Result<CallToolResult, McpError> {
        require_init!(self);
        info!("MCP: set_debt_paid called for {} paid={}", params.id, params.paid);
        tool_result(commands::pay(self.config(), PayArgs::new(params.id, params.paid)).await)
    }
}
