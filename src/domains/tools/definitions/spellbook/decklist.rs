//! Decklist combo analysis tool.
//!
//! Imports a decklist (from a deck-building site URL or pasted text) through
//! the Spellbook import endpoints, then runs the same combo analysis as the
//! card-list tool over the whole deck.

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

use super::common::{
    ComboSummary, clamp_deck_limit, combo_summary, format_combo, resolve_decklist,
};
use crate::core::api::SpellbookClient;
use crate::domains::tools::definitions::common::{default_limit, error_result, structured_result};

/// Parameters for the decklist combo tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpellbookDecklistParams {
    /// URL to a decklist.
    #[schemars(
        description = "URL to a decklist (Moxfield, Archidekt, Deckstats, TappedOut, etc.)"
    )]
    #[serde(default)]
    pub decklist_url: Option<String>,

    /// Pasted decklist text.
    #[schemars(
        description = "Pasted decklist - one card per line, quantity optional (e.g., '1 Sol Ring' or just 'Sol Ring')"
    )]
    #[serde(default)]
    pub decklist_text: Option<String>,

    /// Maximum number of combos to return (default: 10, max: 20).
    #[schemars(description = "Maximum number of combos (default: 10, max: 20)")]
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Structured output for decklist combo analysis.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DeckComboReport {
    pub cards_analyzed: usize,
    pub complete: Vec<ComboSummary>,
    pub almost_complete: Vec<ComboSummary>,
}

/// Decklist combo tool implementation.
#[derive(Debug, Clone)]
pub struct SpellbookDecklistTool;

impl SpellbookDecklistTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spellbook_find_combos_in_decklist";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Find all combos present in a decklist. Accepts either a URL to a deck \
         (Moxfield, Archidekt, etc.) or a pasted list of card names, and reports \
         complete combos plus combos missing a single card.";

    /// Execute the tool logic.
    pub fn execute(params: &SpellbookDecklistParams, client: &SpellbookClient) -> CallToolResult {
        let cards = match resolve_decklist(
            client,
            params.decklist_url.as_deref(),
            params.decklist_text.as_deref(),
        ) {
            Ok(cards) => cards,
            Err(e) => return error_result(&e.to_string()),
        };

        info!("Analyzing decklist with {} cards", cards.len());

        let limit = clamp_deck_limit(params.limit);

        let analysis = match client.find_my_combos(&cards) {
            Ok(analysis) => analysis.results,
            Err(e) => return error_result(&format!("Could not analyze decklist: {e}")),
        };

        let complete: Vec<_> = analysis.included.iter().take(limit).collect();
        let remaining = limit.saturating_sub(complete.len());
        let almost: Vec<_> = analysis.almost_included.iter().take(remaining).collect();

        if complete.is_empty() && almost.is_empty() {
            let empty = DeckComboReport {
                cards_analyzed: cards.len(),
                complete: Vec::new(),
                almost_complete: Vec::new(),
            };
            return structured_result(
                format!("**No combos found** in this deck ({} cards analyzed).", cards.len()),
                &empty,
            );
        }

        let mut text = vec![format!("**Analyzed {} cards**\n", cards.len())];

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

        let report = DeckComboReport {
            cards_analyzed: cards.len(),
            complete: complete.into_iter().map(combo_summary).collect(),
            almost_complete: almost.into_iter().map(combo_summary).collect(),
        };

        structured_result(text.join("\n"), &report)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpellbookDecklistParams>(),
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
                let params: SpellbookDecklistParams =
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
    use crate::core::config::SpellbookConfig;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> SpellbookClient {
        SpellbookClient::new(SpellbookConfig {
            base_url: server.base_url(),
            ..SpellbookConfig::default()
        })
    }

    #[test]
    fn test_missing_both_sources_is_an_error() {
        let server = MockServer::start();
        let params = SpellbookDecklistParams {
            decklist_url: None,
            decklist_text: None,
            limit: 10,
        };
        let result = SpellbookDecklistTool::execute(&params, &client_for(&server));
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_text_decklist_flows_into_analysis() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/card-list-from-text/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"cards": [{"name": "Thassa's Oracle"}, {"name": "Demonic Consultation"}]}"#);
        });
        let analysis_mock = server.mock(|when, then| {
            when.method(POST).path("/find-my-combos/").json_body(
                serde_json::json!({"cards": ["Thassa's Oracle", "Demonic Consultation"]}),
            );
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"results": {"included": [{
                        "id": "450-3551",
                        "identity": "UB",
                        "uses": [{"card": {"name": "Thassa's Oracle"}}, {"card": {"name": "Demonic Consultation"}}],
                        "produces": [{"feature": {"name": "Win the game"}}],
                        "description": "Consult, then Oracle."
                    }], "almost_included": []}}"#,
                );
        });

        let params = SpellbookDecklistParams {
            decklist_url: None,
            decklist_text: Some("1 Thassa's Oracle\n1 Demonic Consultation".to_string()),
            limit: 10,
        };
        let result = SpellbookDecklistTool::execute(&params, &client_for(&server));

        analysis_mock.assert();
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.expect("structured content");
        assert_eq!(structured["cards_analyzed"], 2);
        assert_eq!(structured["complete"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_deck_without_combos_reports_empty_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/card-list-from-text/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"cards": [{"name": "Grizzly Bears"}]}"#);
        });
        server.mock(|when, then| {
            when.method(POST).path("/find-my-combos/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"results": {"included": [], "almost_included": []}}"#);
        });

        let params = SpellbookDecklistParams {
            decklist_url: None,
            decklist_text: Some("1 Grizzly Bears".to_string()),
            limit: 10,
        };
        let result = SpellbookDecklistTool::execute(&params, &client_for(&server));

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.expect("structured content");
        assert!(structured["complete"].as_array().unwrap().is_empty());
    }
}
