//! MCP (Model Context Protocol) server implementation.
//!
//! This module provides an MCP server that exposes the daybook as tools for AI agent integration.
//! The server communicates via JSON-RPC over stdio.

/// Checks if the server has been initialized and returns an error if not.
macro_rules! require_init {
    ($self:expr) => {
        if !$self.check_initialized().await {
            return Self::uninitialized();
        }
    };
}

mod mcp_utils;
mod tools;

use crate::Config;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{
    CallToolResult, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::transport::stdio;
use rmcp::ErrorData as McpError;
use rmcp::{tool_handler, ServerHandler, ServiceExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// The daybook MCP server.
#[derive(Debug, Clone)]
pub struct DaybookServer {
    initialized: Arc<Mutex<bool>>,
    config: Arc<Config>,
    tool_router: ToolRouter<DaybookServer>,
}

impl DaybookServer {
    /// Creates a new DaybookServer with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            initialized: Arc::new(Mutex::new(false)),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    async fn check_initialized(&self) -> bool {
        *self.initialized.lock().await
    }

    fn uninitialized() -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::error(vec![rmcp::model::Content::text(
            "You have not yet initialized the service. Please call initialize_service first.",
        )]))
    }

    fn config(&self) -> Config {
        (*self.config).clone()
    }
}

#[tool_handler]
impl ServerHandler for DaybookServer {
    /// Returns server information sent to the MCP client during initialization.
    ///
    /// Agents tend to treat `instructions` as optional reading, so the tools also refuse to run
    /// until `initialize_service` has returned the full usage instructions.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "daybook".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(include_str!("docs/INTRO.md").into()),
        }
    }
}

/// Transport type for the MCP server.
#[derive(Debug, Default)]
pub(crate) enum Io {
    #[default]
    Stdio,
    /// Mock transport for testing - holds one end of a duplex channel.
    #[cfg(test)]
    Mock(tokio::io::DuplexStream),
}

/// Runs the MCP server with stdio transport or mock transport. This function starts the MCP server
/// and blocks until the client disconnects or an error occurs.
///
/// # Arguments
/// - `config`: The `Config` object
/// - `io`: Whether we are using stdio as the transport or using mock io for testing
pub(crate) async fn run_server(config: Config, io: Io) -> crate::Result<()> {
    use crate::error::{ErrorType, IntoResult};
    let server = DaybookServer::new(config);
    info!("Starting MCP server...");

    let service = match io {
        Io::Stdio => server
            .serve(stdio())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start MCP server: {e}"))
            .pub_result(ErrorType::Service)?,
        #[cfg(test)]
        Io::Mock(stream) => server
            .serve(stream)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start MCP server: {e}"))
            .pub_result(ErrorType::Service)?,
    };

    info!("MCP server running, waiting for requests...");

    service
        .waiting()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))
        .pub_result(ErrorType::Service)?;

    info!("MCP server shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use rmcp::model::CallToolResult;
    use rmcp::service::{RoleClient, RunningService};
    use rmcp::ServiceExt;
    use serde_json::{json, Value};
    use tokio::io::duplex;

    async fn call(
        client: &RunningService<RoleClient, ()>,
        name: &'static str,
        arguments: Value,
    ) -> CallToolResult {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            _ => None,
        };
        client
            .call_tool(rmcp::model::CallToolRequestParam {
                name: name.into(),
                arguments,
            })
            .await
            .unwrap_or_else(|e| panic!("{name} call failed: {e}"))
    }

    fn text(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| c.as_text().map(|t| t.text.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Integration test for the MCP server using an in-memory transport.
    #[tokio::test]
    async fn test_mcp_server_integration() {
        let (client_io, server_io) = duplex(4096);
        let env = TestEnv::new().await;
        let day = env.insert_test_day().await;
        let debt = env
            .insert_test_debt("Ali", rust_decimal_macros::dec!(100), false)
            .await;
        let config = env.config();

        let server_handle =
            tokio::spawn(async move { run_server(config, Io::Mock(server_io)).await });
        let client = ().serve(client_io).await.expect("Failed to create client");

        // Tools refuse to run before initialization.
        let result = call(&client, "unpaid_debts", Value::Null).await;
        assert!(result.is_error.unwrap_or(false));
        assert!(text(&result).contains("initialize_service"));

        let result = call(&client, "initialize_service", Value::Null).await;
        assert!(
            !result.is_error.unwrap_or(false),
            "initialize_service returned error: {:?}",
            result.content
        );

        let result = call(&client, "daily_summary", json!({ "date": day.to_string() })).await;
        assert!(
            !result.is_error.unwrap_or(false),
            "daily_summary returned error: {:?}",
            result.content
        );
        assert!(text(&result).contains("+5.00"));

        let result = call(
            &client,
            "range_summary",
            json!({ "from": "2024-05-01", "to": "2024-05-31" }),
        )
        .await;
        assert!(!result.is_error.unwrap_or(false));

        let result = call(
            &client,
            "insert_expense",
            json!({ "date": "2024-05-10", "name": "water", "amount": "₺15" }),
        )
        .await;
        assert!(
            !result.is_error.unwrap_or(false),
            "insert_expense returned error: {:?}",
            result.content
        );

        let result = call(
            &client,
            "list_records",
            json!({ "entity": "expense", "date": "2024-05-10" }),
        )
        .await;
        assert!(text(&result).starts_with("Found 3 expenses"));

        let result = call(&client, "set_debt_paid", json!({ "id": debt.id, "paid": true })).await;
        assert!(!result.is_error.unwrap_or(false));
        let result = call(&client, "unpaid_debts", Value::Null).await;
        assert!(text(&result).starts_with("0 unpaid debts"));

        // Command errors are tool errors, not protocol errors.
        let result = call(
            &client,
            "range_summary",
            json!({ "from": "2024-05-31", "to": "2024-05-01" }),
        )
        .await;
        assert!(result.is_error.unwrap_or(false));
        assert!(text(&result).contains("is before the range start"));

        let result = call(&client, "daily_summary", json!({ "date": "10/05/2024" })).await;
        assert!(result.is_error.unwrap_or(false));

        drop(client);

        let server_result = tokio::time::timeout(std::time::Duration::from_secs(5), server_handle)
            .await
            .expect("Server timed out")
            .expect("Server task panicked");
        assert!(
            server_result.is_ok(),
            "Server returned error: {:?}",
            server_result
        );
    }

    #[tokio::test]
    async fn test_mcp_lists_tools() {
        let (client_io, server_io) = duplex(4096);
        let env = TestEnv::new().await;
        let config = env.config();
        let _server_handle =
            tokio::spawn(async move { run_server(config, Io::Mock(server_io)).await });
        let client = ().serve(client_io).await.expect("Failed to create client");

        let tools = client
            .list_tools(Default::default())
            .await
            .expect("Failed to list tools");
        let mut names: Vec<String> = tools.tools.iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "daily_summary",
                "initialize_service",
                "insert_expense",
                "list_records",
                "range_summary",
                "set_debt_paid",
                "unpaid_debts",
            ]
        );
    }
}
