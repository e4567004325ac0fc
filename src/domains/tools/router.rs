//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module wires them all
//! together and injects the shared upstream API clients. The Scryfall client
//! carries the request-spacing limiter, so every Scryfall tool must use the
//! same instance.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::api::{ScryfallClient, SpellbookClient};

use super::definitions::{
    ScryfallNamedTool, ScryfallRandomTool, ScryfallRulingsTool, ScryfallSearchTool,
    SpellbookBracketTool, SpellbookComboTool, SpellbookDecklistTool, SpellbookFindCombosTool,
    SpellbookSearchTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(
    scryfall: Arc<ScryfallClient>,
    spellbook: Arc<SpellbookClient>,
) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ScryfallSearchTool::create_route(scryfall.clone()))
        .with_route(ScryfallNamedTool::create_route(scryfall.clone()))
        .with_route(ScryfallRandomTool::create_route(scryfall.clone()))
        .with_route(ScryfallRulingsTool::create_route(scryfall))
        .with_route(SpellbookSearchTool::create_route(spellbook.clone()))
        .with_route(SpellbookFindCombosTool::create_route(spellbook.clone()))
        .with_route(SpellbookComboTool::create_route(spellbook.clone()))
        .with_route(SpellbookDecklistTool::create_route(spellbook.clone()))
        .with_route(SpellbookBracketTool::create_route(spellbook))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ScryfallConfig, SpellbookConfig};

    struct TestServer {}

    fn test_clients() -> (Arc<ScryfallClient>, Arc<SpellbookClient>) {
        (
            Arc::new(ScryfallClient::new(ScryfallConfig::default())),
            Arc::new(SpellbookClient::new(SpellbookConfig::default())),
        )
    }

    #[test]
    fn test_build_router() {
        let (scryfall, spellbook) = test_clients();
        let router: ToolRouter<TestServer> = build_tool_router(scryfall, spellbook);
        let tools = router.list_all();
        assert_eq!(tools.len(), 9);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"scryfall_search_cards"));
        assert!(names.contains(&"scryfall_get_card"));
        assert!(names.contains(&"scryfall_random_card"));
        assert!(names.contains(&"scryfall_get_rulings"));
        assert!(names.contains(&"spellbook_search_combos"));
        assert!(names.contains(&"spellbook_find_combos_for_cards"));
        assert!(names.contains(&"spellbook_get_combo"));
        assert!(names.contains(&"spellbook_find_combos_in_decklist"));
        assert!(names.contains(&"spellbook_estimate_bracket"));
    }

    #[test]
    fn test_every_tool_has_a_description() {
        let (scryfall, spellbook) = test_clients();
        let router: ToolRouter<TestServer> = build_tool_router(scryfall, spellbook);
        for tool in router.list_all() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
        }
    }
}
