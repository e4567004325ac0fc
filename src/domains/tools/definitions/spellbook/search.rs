//! Combo search tool.
//!
//! Searches Commander Spellbook combos by card names, effects, or color
//! identity using Spellbook's query syntax.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::common::{ComboSummary, combo_summary, format_combo};
use crate::core::api::SpellbookClient;
use crate::domains::tools::definitions::common::{
    clamp_limit, default_limit, error_result, structured_result,
};

/// Parameters for the combo search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpellbookSearchParams {
    /// Search query.
    #[schemars(
        description = "Search query. Can include card names, effects, or Spellbook syntax: 'card:\"Thassa's Oracle\"' for combos with that card, 'result:infinite' for infinite combos"
    )]
    pub query: String,

    /// Filter by color identity.
    #[schemars(
        description = "Filter by color identity using WUBRG letters. Examples: 'UB' for Dimir, 'GUR' for Temur, 'WUBRG' for 5-color"
    )]
    #[serde(default)]
    pub color_identity: Option<String>,

    /// Maximum number of combos to return (default: 10, max: 50).
    #[schemars(description = "Maximum number of combos (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Structured output for combo search results.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ComboSearchResult {
    pub query: String,
    pub total: u64,
    pub combos: Vec<ComboSummary>,
}

/// Combo search tool implementation.
#[derive(Debug, Clone)]
pub struct SpellbookSearchTool;

impl SpellbookSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spellbook_search_combos";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for Commander/EDH combos on Commander Spellbook by card names, \
         effects, or color identity. Returns combo summaries with the cards \
         involved, prerequisites, steps, and results.";

    /// Execute the tool logic.
    pub fn execute(params: &SpellbookSearchParams, client: &SpellbookClient) -> CallToolResult {
        info!("Searching combos: {}", params.query);

        let limit = clamp_limit(params.limit);

        let list = match client.search_variants(
            &params.query,
            params.color_identity.as_deref(),
            limit,
        ) {
            Ok(list) => list,
            Err(e) => return error_result(&format!("Combo search failed: {e}")),
        };

        let total = list.count.unwrap_or(list.results.len() as u64);
        let combos: Vec<_> = list.results.iter().take(limit).collect();

        if combos.is_empty() {
            let empty = ComboSearchResult {
                query: params.query.clone(),
                total: 0,
                combos: Vec::new(),
            };
            return structured_result(
                "**No combos found.** Try a different search query or broader color identity."
                    .to_string(),
                &empty,
            );
        }

        let mut text = vec![format!("**Found {} combos** (showing {})\n", total, combos.len())];
        for combo in &combos {
            text.push(format_combo(combo));
            text.push("\n---\n".to_string());
        }

        let result = ComboSearchResult {
            query: params.query.clone(),
            total,
            combos: combos.into_iter().map(combo_summary).collect(),
        };

        structured_result(text.join("\n"), &result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpellbookSearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute bound to the shared Spellbook client.
    pub fn create_route<S>(client: Arc<SpellbookClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: SpellbookSearchParams =
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
