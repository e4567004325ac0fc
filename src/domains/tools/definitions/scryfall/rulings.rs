//! Card rulings tool.
//!
//! Rulings are official clarifications from Wizards of the Coast about how a
//! card works. The tool resolves the card by fuzzy name first, then fetches
//! the rulings by card id; both calls go through the rate limiter.

use chrono::NaiveDate;
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

use crate::core::api::scryfall::Ruling;
use crate::core::api::{ApiError, ScryfallClient};
use crate::domains::tools::definitions::common::{error_result, structured_result};

/// Parameters for the rulings tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScryfallRulingsParams {
    /// Name of the card to get rulings for.
    #[schemars(description = "Name of the card to get rulings for")]
    pub card_name: String,
}

/// One ruling in the structured output.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RulingSummary {
    pub published_at: String,
    pub source: String,
    pub comment: String,
}

/// Structured output for the rulings tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CardRulings {
    pub card_name: String,
    pub rulings: Vec<RulingSummary>,
}

/// Card rulings tool implementation.
#[derive(Debug, Clone)]
pub struct ScryfallRulingsTool;

impl ScryfallRulingsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "scryfall_get_rulings";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get official rulings for a Magic: The Gathering card. Rulings are \
         clarifications from Wizards of the Coast about how a card works, useful \
         for understanding complex interactions. Newest rulings come first.";

    /// Execute the tool logic.
    pub fn execute(params: &ScryfallRulingsParams, client: &ScryfallClient) -> CallToolResult {
        info!("Fetching rulings for: {}", params.card_name);

        // Resolve the card first; rulings are addressed by Scryfall id.
        let card = match client.named_card(&params.card_name, true, None) {
            Ok(card) => card,
            Err(ApiError::NotFound(_)) => {
                return error_result(&format!("Could not find card '{}'", params.card_name));
            }
            Err(e) => return error_result(&format!("Card lookup failed: {e}")),
        };

        let mut rulings = match client.rulings(&card.id) {
            Ok(list) => list.data,
            Err(e) => return error_result(&format!("Could not get rulings: {e}")),
        };

        if rulings.is_empty() {
            let empty = CardRulings {
                card_name: card.name.clone(),
                rulings: Vec::new(),
            };
            return structured_result(
                format!(
                    "**No rulings found for {}.**\n\nThis card has no official rulings or clarifications.",
                    card.name
                ),
                &empty,
            );
        }

        sort_newest_first(&mut rulings);

        let mut text = vec![format!("## Rulings for {}\n", card.name)];
        for ruling in &rulings {
            text.push(format!(
                "**{}** ({})",
                ruling.published_at,
                source_label(&ruling.source)
            ));
            text.push(format!("> {}\n", ruling.comment));
        }

        let result = CardRulings {
            card_name: card.name,
            rulings: rulings
                .into_iter()
                .map(|r| RulingSummary {
                    published_at: r.published_at,
                    source: r.source,
                    comment: r.comment,
                })
                .collect(),
        };

        structured_result(text.join("\n"), &result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ScryfallRulingsParams>(),
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
                let params: ScryfallRulingsParams =
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

/// Order rulings newest first. Scryfall dates are `YYYY-MM-DD`; anything
/// unparseable sorts last.
fn sort_newest_first(rulings: &mut [Ruling]) {
    rulings.sort_by_key(|r| {
        std::cmp::Reverse(NaiveDate::parse_from_str(&r.published_at, "%Y-%m-%d").ok())
    });
}

/// Human-readable label for a ruling source.
fn source_label(source: &str) -> String {
    if source == "wotc" {
        "Wizards of the Coast".to_string()
    } else {
        source.to_uppercase()
    }
}
