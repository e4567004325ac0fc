//! Single combo lookup tool.
//!
//! Fetches full details for one combo when its Commander Spellbook id is
//! already known (for example from a prior search).

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

use super::common::{combo_summary, format_combo};
use crate::core::api::{ApiError, SpellbookClient};
use crate::domains::tools::definitions::common::{error_result, structured_result};

/// Parameters for the combo lookup tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SpellbookComboParams {
    /// The Commander Spellbook combo ID.
    #[schemars(description = "The Commander Spellbook combo ID (e.g., '450-3551')")]
    pub combo_id: String,
}

/// Combo lookup tool implementation.
#[derive(Debug, Clone)]
pub struct SpellbookComboTool;

impl SpellbookComboTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "spellbook_get_combo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detailed information about a specific combo by its Commander Spellbook \
         ID, including prerequisites, steps, and results.";

    /// Execute the tool logic.
    pub fn execute(params: &SpellbookComboParams, client: &SpellbookClient) -> CallToolResult {
        info!("Fetching combo: {}", params.combo_id);

        match client.variant(&params.combo_id) {
            Ok(variant) => structured_result(format_combo(&variant), &combo_summary(&variant)),
            Err(ApiError::NotFound(_)) => error_result(&format!(
                "Could not find combo with ID '{}'",
                params.combo_id
            )),
            Err(e) => error_result(&format!("Combo lookup failed: {e}")),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SpellbookComboParams>(),
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
                let params: SpellbookComboParams =
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
    fn test_lookup_by_id() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/variants/450-3551");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"id": "450-3551", "identity": "UB",
                        "uses": [{"card": {"name": "Thassa's Oracle"}}],
                        "produces": [{"feature": {"name": "Win the game"}}],
                        "description": "Win."}"#,
                );
        });

        let params = SpellbookComboParams {
            combo_id: "450-3551".to_string(),
        };
        let result = SpellbookComboTool::execute(&params, &client_for(&server));

        mock.assert();
        assert_eq!(result.is_error, Some(false));
        let structured = result.structured_content.expect("structured content");
        assert_eq!(structured["id"], "450-3551");
        assert!(
            structured["url"]
                .as_str()
                .unwrap()
                .ends_with("/combo/450-3551")
        );
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/variants/nope");
            then.status(404).body(r#"{"detail": "Not found."}"#);
        });

        let params = SpellbookComboParams {
            combo_id: "nope".to_string(),
        };
        let result = SpellbookComboTool::execute(&params, &client_for(&server));
        assert_eq!(result.is_error, Some(true));
    }
}
