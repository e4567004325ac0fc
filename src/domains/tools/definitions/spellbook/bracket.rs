//! Commander bracket estimation tool.
//!
//! Resolves a decklist the same way the decklist combo tool does, then asks
//! Spellbook to estimate the deck's Commander bracket (the official WotC
//! power-level system, 1-5). Two-card combos weigh heaviest in the estimate,
//! so they are listed alongside the per-bracket combo counts.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

use super::common::{ComboSummary, combo_summary, resolve_decklist};
use crate::core::api::SpellbookClient;
use crate::domains::tools::definitions::common::{error_result, structured_result};

/// How many two-card combos to spell out in the text body.
const LISTED_TWO_CARD_COMBOS: usize = 8;

/// Parameters for the bracket estimation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpellbookBracketParams {
    /// URL to a decklist.
    #[schemars(
        description = "URL to a decklist (Moxfield, Archidekt, Deckstats, TappedOut, etc.)"
    )]
    #[serde(default)]
    pub decklist_url: Option<String>,

    /// Pasted decklist text.
    #[schemars(description = "Pasted decklist - one card per line, quantity optional")]
    #[serde(default)]
    pub decklist_text: Option<String>,
}

/// Structured output for bracket estimation.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct BracketReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket: Option<String>,
    pub cards_analyzed: usize,
    pub two_card_combos: Vec<ComboSummary>,
    pub combos_by_bracket: BTreeMap<String, u64>,
}

/// Bracket estimation tool implementation.
#[derive(Debug, Clone)]
pub struct SpellbookBracketTool;

impl SpellbookBracketTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spellbook_estimate_bracket";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Estimate the Commander bracket (power level) for a decklist. Accepts a \
         deck URL or pasted card list. Bracket 1: Exhibition. Bracket 2: Core. \
         Bracket 3: Upgraded. Bracket 4: Optimized/cEDH. Reports the two-card \
         combos and per-bracket combo counts driving the estimate.";

    /// Execute the tool logic.
    pub fn execute(params: &SpellbookBracketParams, client: &SpellbookClient) -> CallToolResult {
        let cards = match resolve_decklist(
            client,
            params.decklist_url.as_deref(),
            params.decklist_text.as_deref(),
        ) {
            Ok(cards) => cards,
            Err(e) => return error_result(&e.to_string()),
        };

        info!("Estimating bracket for {} cards", cards.len());

        let estimate = match client.estimate_bracket(&cards) {
            Ok(estimate) => estimate,
            Err(e) => return error_result(&format!("Could not estimate bracket: {e}")),
        };

        let bracket = estimate.bracket.as_ref().map(|b| b.to_string());
        let bracket_label = bracket.as_deref().unwrap_or("Unknown");

        let mut text = vec![format!("## Bracket Estimation: **{bracket_label}**")];
        text.push(format!("*Cards analyzed: {}*\n", cards.len()));

        if let Some(description) = bracket
            .as_deref()
            .and_then(|b| b.split_whitespace().next())
            .and_then(bracket_description)
        {
            text.push(format!("**{description}**\n"));
        }

        if !estimate.two_card_combos.is_empty() {
            text.push(format!(
                "### Two-Card Combos ({} found)",
                estimate.two_card_combos.len()
            ));
            text.push("*These have the biggest impact on bracket level*\n".to_string());
            for combo in estimate.two_card_combos.iter().take(LISTED_TWO_CARD_COMBOS) {
                let cards_in_combo = combo.card_names().join(" + ");
                let results: Vec<_> = combo
                    .produces
                    .iter()
                    .take(2)
                    .filter_map(|p| p.feature.as_ref())
                    .map(|f| f.name.as_str())
                    .collect();
                let results_str = if results.is_empty() {
                    String::new()
                } else {
                    format!(" -> {}", results.join(", "))
                };
                text.push(format!("- **{cards_in_combo}**{results_str}"));
            }
            if estimate.two_card_combos.len() > LISTED_TWO_CARD_COMBOS {
                text.push(format!(
                    "\n*...and {} more two-card combos*",
                    estimate.two_card_combos.len() - LISTED_TWO_CARD_COMBOS
                ));
            }
        }

        let combos_by_bracket: BTreeMap<String, u64> = estimate
            .combos_by_bracket
            .iter()
            .map(|(level, combos)| (level.clone(), combo_count(combos)))
            .collect();

        if !combos_by_bracket.is_empty() {
            text.push("\n### All Combos by Bracket Level".to_string());
            for (level, count) in &combos_by_bracket {
                text.push(format!("- Bracket {level}: {count} combos"));
            }
        }

        let report = BracketReport {
            bracket,
            cards_analyzed: cards.len(),
            two_card_combos: estimate.two_card_combos.iter().map(combo_summary).collect(),
            combos_by_bracket,
        };

        structured_result(text.join("\n"), &report)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpellbookBracketParams>(),
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
                let params: SpellbookBracketParams =
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

/// One-line description of a bracket level.
fn bracket_description(level: &str) -> Option<&'static str> {
    match level {
        "1" => Some("Exhibition - Thematic, creative, 9+ turns expected"),
        "2" => Some("Core - Unoptimized, social, no two-card infinites"),
        "3" => Some("Upgraded - Strong synergy, up to 3 game changers"),
        "4" => Some("Optimized/cEDH - Lethal, consistent, anything goes"),
        _ => None,
    }
}

/// Per-bracket counts arrive either as a combo list or a bare number.
fn combo_count(value: &serde_json::Value) -> u64 {
    value
        .as_array()
        .map(|combos| combos.len() as u64)
        .or_else(|| value.as_u64())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SpellbookConfig;
    use httpmock::prelude::*;

    #[test]
    fn test_bracket_description_levels() {
        assert!(bracket_description("1").unwrap().contains("Exhibition"));
        assert!(bracket_description("4").unwrap().contains("cEDH"));
        assert!(bracket_description("9").is_none());
    }

    #[test]
    fn test_combo_count_handles_both_shapes() {
        assert_eq!(combo_count(&serde_json::json!([1, 2, 3])), 3);
        assert_eq!(combo_count(&serde_json::json!(7)), 7);
        assert_eq!(combo_count(&serde_json::json!("junk")), 0);
    }

    #[test]
    fn test_estimate_flow() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/card-list-from-text/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"cards": [{"name": "Thassa's Oracle"}, {"name": "Demonic Consultation"}]}"#);
        });
        server.mock(|when, then| {
            when.method(POST).path("/estimate-bracket/");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"bracket": 4,
                        "combos_by_bracket": {"4": [{"id": "x"}]},
                        "two_card_combos": [{
                            "id": "450-3551",
                            "identity": "UB",
                            "uses": [{"card": {"name": "Thassa's Oracle"}}, {"card": {"name": "Demonic Consultation"}}],
                            "produces": [{"feature": {"name": "Win the game"}}],
                            "description": "Consult, then Oracle."
                        }]}"#,
                );
        });

        let client = SpellbookClient::new(SpellbookConfig {
            base_url: server.base_url(),
            ..SpellbookConfig::default()
        });
        let params = SpellbookBracketParams {
            decklist_url: None,
            decklist_text: Some("1 Thassa's Oracle\n1 Demonic Consultation".to_string()),
        };
        let result = SpellbookBracketTool::execute(&params, &client);

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.expect("structured content");
        assert_eq!(structured["bracket"], "4");
        assert_eq!(structured["combos_by_bracket"]["4"], 1);
        assert_eq!(structured["two_card_combos"].as_array().unwrap().len(), 1);
    }
}
