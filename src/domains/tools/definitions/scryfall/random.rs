//! Random card tool.
//!
//! Fetches a random card, optionally constrained by a Scryfall query.
//! Useful for discovery, deck-building challenges, or inspiration.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::common::{card_summary, format_card};
use crate::core::api::{ApiError, ScryfallClient};
use crate::domains::tools::definitions::common::{error_result, structured_result};

/// Parameters for the random card tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScryfallRandomParams {
    /// Optional Scryfall query to filter the random selection.
    #[schemars(
        description = "Optional Scryfall query to filter random selection. Example: 't:creature c:red' for a random red creature"
    )]
    #[serde(default)]
    pub query: Option<String>,
}

/// Random card tool implementation.
#[derive(Debug, Clone)]
pub struct ScryfallRandomTool;

impl ScryfallRandomTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "scryfall_random_card";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a random Magic: The Gathering card, optionally filtered with a Scryfall \
         query. Each call returns a different card.";

    /// Execute the tool logic.
    pub fn execute(params: &ScryfallRandomParams, client: &ScryfallClient) -> CallToolResult {
        info!("Fetching random card (filter: {:?})", params.query);

        match client.random_card(params.query.as_deref()) {
            Ok(card) => structured_result(format_card(&card), &card_summary(&card)),
            Err(ApiError::NotFound(_)) => {
                error_result("No card matched the filter. Try a broader query.")
            }
            Err(e) => error_result(&format!("Could not get a random card: {e}")),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ScryfallRandomParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute bound to the shared Scryfall client.
    pub fn create_route<S>(client: Arc<ScryfallClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: ScryfallRandomParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let result = tokio::task::spawn_blocking(move || Self::execute(&params, &client))
                    .await
                    .map_err(|e| {
                        McpError::internal_error(format!("Task execution failed: {e}"), None)
                    })?;

                Ok(result)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ScryfallConfig;
    use httpmock::prelude::*;

    #[test]
    fn test_params_accept_empty_object() {
        let params: ScryfallRandomParams = serde_json::from_str("{}").unwrap();
        assert!(params.query.is_none());
    }

    #[test]
    fn test_filter_is_forwarded() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/cards/random")
                .query_param("q", "t:creature c:red");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id": "z", "name": "Goblin Guide", "color_identity": ["R"]}"#);
        });

        let client = ScryfallClient::new(ScryfallConfig {
            base_url: server.base_url(),
            min_interval_ms: 0,
            ..ScryfallConfig::default()
        });
        let params = ScryfallRandomParams {
            query: Some("t:creature c:red".to_string()),
        };
        let result = ScryfallRandomTool::execute(&params, &client);

        mock.assert();
        assert_eq!(result.is_error, Some(false));
    }
}
