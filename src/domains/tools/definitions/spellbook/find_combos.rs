//! Combo lookup over an explicit card list.
//!
//! Submits the card names to Spellbook's combo analysis endpoint. Complete
//! combos are those whose required cards are all within the supplied list;
//! combos missing exactly one card are reported separately.

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

/// Parameters for the card-list combo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpellbookFindCombosParams {
    /// List of card names to find combos for.
    #[schemars(
        description = "List of card names to find combos for. Example: [\"Thassa's Oracle\", \"Demonic Consultation\"]"
    )]
    pub cards: Vec<String>,

    /// Maximum number of combos to return (default: 10, max: 50).
    #[schemars(description = "Maximum number of combos (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Structured output for card-list combo analysis.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ComboFindings {
    pub cards_submitted: usize,
    /// Combos whose required cards are a subset of the submitted list.
    pub complete: Vec<ComboSummary>,
    /// Combos missing exactly one card from the submitted list.
    pub almost_complete: Vec<ComboSummary>,
}

/// Card-list combo tool implementation.
#[derive(Debug, Clone)]
pub struct SpellbookFindCombosTool;

impl SpellbookFindCombosTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spellbook_find_combos_for_cards";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Find all combos that can be assembled from a specific set of cards. Only \
         combos whose required cards are fully contained in the list count as \
         complete; combos one card short are reported separately. Perfect for \
         checking what a handful of cards enables.";

    /// Execute the tool logic.
    pub fn execute(params: &SpellbookFindCombosParams, client: &SpellbookClient) -> CallToolResult {
        let cards: Vec<String> = params
            .cards
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if cards.is_empty() {
            return error_result("Provide at least one card name.");
        }

        info!("Finding combos for {} cards", cards.len());

        let limit = clamp_limit(params.limit);

        let analysis = match client.find_my_combos(&cards) {
            Ok(analysis) => analysis.results,
            Err(e) => return error_result(&format!("Combo analysis failed: {e}")),
        };

        let complete: Vec<_> = analysis.included.iter().take(limit).collect();
        let remaining = limit.saturating_sub(complete.len());
        let almost: Vec<_> = analysis.almost_included.iter().take(remaining).collect();

        if complete.is_empty() && almost.is_empty() {
            let empty = ComboFindings {
                cards_submitted: cards.len(),
                complete: Vec::new(),
                almost_complete: Vec::new(),
            };
            return structured_result(
                format!(
                    "**No combos found** containing these cards: {}\n\nThese cards may not have any documented combos, or try different card names.",
                    cards.join(", ")
                ),
                &empty,
            );
        }

        let mut text = vec![format!("**Combos containing:** {}\n", cards.join(", "))];

        if !complete.is_empty() {
            text.push(format!("## Complete Combos ({} found)\n", analysis.included.len()));
            for combo in &complete {
                text.push(format_combo(combo));
                text.push("\n---\n".to_string());
            }
        }

        if !almost.is_empty() {
            text.push("\n## Almost Complete (missing 1 card)\n".to_string());
            for combo in &almost {
                if let Some(name) = combo.missing.first().and_then(|m| m.card.as_ref()) {
                    text.push(format!("**Missing:** {}\n", name.name));
                }
                text.push(format_combo(combo));
                text.push("\n---\n".to_string());
            }
        }

        let result = ComboFindings {
            cards_submitted: cards.len(),
            complete: complete.into_iter().map(combo_summary).collect(),
            almost_complete: almost.into_iter().map(combo_summary).collect(),
        };

        structured_result(text.join("\n"), &result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpellbookFindCombosParams>(),
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
                let params: SpellbookFindCombosParams =
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
