//! Scryfall card search tool.
//!
//! Full-text card search using Scryfall's query syntax. The query string is
//! passed through to the API verbatim; Scryfall validates the syntax and
//! reports its own error message for malformed queries.

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

use super::common::{CardSummary, card_summary, format_card};
use crate::core::api::{ApiError, ScryfallClient};
use crate::domains::tools::definitions::common::{
    clamp_limit, default_limit, error_result, structured_result,
};

/// Parameters for the card search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScryfallSearchParams {
    /// Search query using Scryfall syntax.
    #[schemars(
        description = "Search query using Scryfall syntax. Examples: 'c:green t:creature pow>=5' (green creatures with 5+ power), 'o:\"draw a card\" id:izzet' (Izzet cards with draw effects), 't:legendary t:creature id:simic' (Simic legendary creatures)"
    )]
    pub query: String,

    /// Maximum number of results to return (default: 10, max: 50).
    #[schemars(description = "Maximum number of results (default: 10, max: 50)")]
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Sort order for results.
    #[schemars(
        description = "Sort order: 'name', 'released', 'set', 'rarity', 'color', 'usd', 'cmc', 'power', 'toughness', 'edhrec' (by EDHREC rank)"
    )]
    #[serde(default)]
    pub order: Option<String>,
}

/// Structured output for card search results.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CardSearchResult {
    pub query: String,
    pub total: u64,
    pub cards: Vec<CardSummary>,
}

/// Scryfall card search tool implementation.
#[derive(Debug, Clone)]
pub struct ScryfallSearchTool;

impl ScryfallSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "scryfall_search_cards";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for Magic: The Gathering cards using Scryfall's search syntax. \
         Common operators: c:/color: (card color), id:/identity: (Commander color identity), \
         t:/type: (card type), o:/oracle: (rules text contains), cmc:/mv: (mana value), \
         pow:/tou: (power/toughness), r:/rarity:, is:commander. \
         Returns card summaries with mana cost, type, oracle text, legality, and prices.";

    /// Execute the tool logic.
    pub fn execute(params: &ScryfallSearchParams, client: &ScryfallClient) -> CallToolResult {
        info!("Searching cards: {}", params.query);

        let limit = clamp_limit(params.limit);

        let list = match client.search_cards(&params.query, params.order.as_deref()) {
            Ok(list) => list,
            // Scryfall signals "no matches" with a 404; that is an empty
            // result for a search, not a failure.
            Err(ApiError::NotFound(_)) => {
                let empty = CardSearchResult {
                    query: params.query.clone(),
                    total: 0,
                    cards: Vec::new(),
                };
                return structured_result(
                    format!("**Found 0 cards** for `{}`", params.query),
                    &empty,
                );
            }
            Err(e) => return error_result(&format!("Card search failed: {e}")),
        };

        let total = list.total_cards.unwrap_or(list.data.len() as u64);
        let cards: Vec<_> = list.data.iter().take(limit).collect();

        let mut text = vec![format!(
            "**Found {} cards** (showing {})\n",
            total,
            cards.len()
        )];
        for card in &cards {
            text.push(format_card(card));
            text.push("\n---\n".to_string());
        }

        let result = CardSearchResult {
            query: params.query.clone(),
            total,
            cards: cards.into_iter().map(card_summary).collect(),
        };

        structured_result(text.join("\n"), &result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ScryfallSearchParams>(),
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
                let params: ScryfallSearchParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                // The client blocks (HTTP plus rate-limit sleep), so run it
                // off the async worker threads.
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

    fn client_for(server: &MockServer) -> ScryfallClient {
        ScryfallClient::new(ScryfallConfig {
            base_url: server.base_url(),
            min_interval_ms: 0,
            ..ScryfallConfig::default()
        })
    }

    #[test]
    fn test_params_default_limit() {
        let json = r#"{"query": "c:blue t:creature"}"#;
        let params: ScryfallSearchParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.limit, 10);
        assert!(params.order.is_none());
    }

    #[test]
    fn test_missing_query_is_rejected() {
        let json = r#"{"limit": 5}"#;
        let result: Result<ScryfallSearchParams, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_blue_creature_search_returns_one_summary() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/cards/search")
                .query_param("q", "c:blue t:creature");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"total_cards": 2, "has_more": false, "data": [
                        {"id": "1", "name": "Thassa's Oracle", "mana_cost": "{U}{U}",
                         "type_line": "Creature — Merfolk Wizard", "color_identity": ["U"]},
                        {"id": "2", "name": "Snapcaster Mage", "mana_cost": "{1}{U}",
                         "type_line": "Creature — Human Wizard", "color_identity": ["U"]}
                    ]}"#,
                );
        });

        let params = ScryfallSearchParams {
            query: "c:blue t:creature".to_string(),
            limit: 1,
            order: None,
        };
        let result = ScryfallSearchTool::execute(&params, &client_for(&server));

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.expect("structured content");
        let cards = structured["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 1);
        assert!(
            cards[0]["color_identity"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("U"))
        );
        assert!(
            cards[0]["type_line"]
                .as_str()
                .unwrap()
                .contains("Creature")
        );
        assert_eq!(structured["total"], 2);
    }

    #[test]
    fn test_zero_matches_is_an_empty_result_not_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cards/search");
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"object": "error", "status": 404, "details": "Your query didn't match any cards."}"#);
        });

        let params = ScryfallSearchParams {
            query: "name:zzzznotacard".to_string(),
            limit: 10,
            order: None,
        };
        let result = ScryfallSearchTool::execute(&params, &client_for(&server));

        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.expect("structured content");
        assert_eq!(structured["total"], 0);
        assert!(structured["cards"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_upstream_failure_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/cards/search");
            then.status(500).body("oops");
        });

        let params = ScryfallSearchParams {
            query: "t:creature".to_string(),
            limit: 10,
            order: None,
        };
        let result = ScryfallSearchTool::execute(&params, &client_for(&server));
        assert_eq!(result.is_error, Some(true));
    }
}
