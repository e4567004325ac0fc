//! Single-card lookup tool.
//!
//! Faster than search when the card name is known. Fuzzy matching tolerates
//! typos and partial names and resolves to the closest match; exact matching
//! reports a distinct not-found error on a miss.

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

fn default_fuzzy() -> bool {
    true
}

/// Parameters for the card lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScryfallNamedParams {
    /// Card name to look up.
    #[schemars(description = "Card name to look up (e.g., 'Lightning Bolt', 'Rhystic Study')")]
    pub name: String,

    /// Whether to allow fuzzy matching.
    #[schemars(
        description = "If true, allows fuzzy matching for typos/partial names. If false, requires an exact name match."
    )]
    #[serde(default = "default_fuzzy")]
    pub fuzzy: bool,

    /// Optional set code to get a specific printing.
    #[schemars(
        description = "Optional set code to get a specific printing (e.g., 'mh2', 'cmr')"
    )]
    #[serde(default)]
    pub set_code: Option<String>,
}

/// Scryfall card lookup tool implementation.
#[derive(Debug, Clone)]
pub struct ScryfallNamedTool;

impl ScryfallNamedTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "scryfall_get_card";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Look up a specific Magic: The Gathering card by name. Faster than searching \
         when the exact card is known. Supports fuzzy matching for typos or partial \
         names, and an optional set code to pick a specific printing.";

    /// Execute the tool logic.
    pub fn execute(params: &ScryfallNamedParams, client: &ScryfallClient) -> CallToolResult {
        info!("Looking up card: {} (fuzzy: {})", params.name, params.fuzzy);

        match client.named_card(&params.name, params.fuzzy, params.set_code.as_deref()) {
            Ok(card) => structured_result(format_card(&card), &card_summary(&card)),
            Err(ApiError::NotFound(details)) => error_result(&format!(
                "Card not found: {details} Try enabling fuzzy matching or a different name."
            )),
            Err(e) => error_result(&format!("Card lookup failed: {e}")),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ScryfallNamedParams>(),
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
                let params: ScryfallNamedParams =
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
