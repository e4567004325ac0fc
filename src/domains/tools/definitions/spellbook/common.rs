//! Shared combo summarization, formatting, and decklist resolution for the
//! Commander Spellbook tools.

use schemars::JsonSchema;
use serde::Serialize;

use crate::core::api::SpellbookClient;
use crate::core::api::spellbook::Variant;
use crate::domains::tools::ToolError;

/// Validate and clamp a decklist-analysis limit to the allowed range (1-20).
pub fn clamp_deck_limit(limit: usize) -> usize {
    limit.clamp(1, 20)
}

/// The summary view of a combo returned as structured content.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ComboSummary {
    pub id: String,
    pub color_identity: String,
    pub cards: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<String>,
    pub results: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_cards: Vec<String>,
    pub url: String,
}

/// Reduce a combo variant to its summary view.
pub fn combo_summary(variant: &Variant) -> ComboSummary {
    ComboSummary {
        id: variant.id.clone(),
        color_identity: variant.identity.clone(),
        cards: variant
            .card_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        prerequisites: variant
            .requires
            .iter()
            .filter_map(|r| r.template.as_ref())
            .map(|t| t.name.clone())
            .filter(|n| !n.is_empty())
            .collect(),
        steps: Some(variant.description.clone()).filter(|d| !d.is_empty()),
        results: variant
            .produces
            .iter()
            .filter_map(|p| p.feature.as_ref())
            .map(|f| f.name.clone())
            .filter(|n| !n.is_empty())
            .collect(),
        bracket: variant.bracket.as_ref().map(|b| b.to_string()),
        missing_cards: variant
            .missing
            .iter()
            .filter_map(|m| m.card.as_ref())
            .map(|c| c.name.clone())
            .collect(),
        url: combo_url(&variant.id),
    }
}

/// Public page for a combo on Commander Spellbook.
pub fn combo_url(id: &str) -> String {
    format!("https://commanderspellbook.com/combo/{id}")
}

/// Render a combo as readable Markdown.
pub fn format_combo(variant: &Variant) -> String {
    let mut lines = vec![format!("## Combo #{}", variant.id)];

    let cards = variant.card_names();
    if !cards.is_empty() {
        lines.push(format!("\n**Cards:** {}", cards.join(", ")));
    }

    if !variant.identity.is_empty() {
        lines.push(format!("**Color Identity:** {}", variant.identity));
    }

    let prerequisites: Vec<_> = variant
        .requires
        .iter()
        .filter_map(|r| r.template.as_ref())
        .map(|t| t.name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    if !prerequisites.is_empty() {
        lines.push("\n**Prerequisites:**".to_string());
        for name in prerequisites {
            lines.push(format!("- {name}"));
        }
    }

    if !variant.description.is_empty() {
        lines.push(format!("\n**Steps:**\n{}", variant.description));
    }

    let results: Vec<_> = variant
        .produces
        .iter()
        .filter_map(|p| p.feature.as_ref())
        .map(|f| f.name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    if !results.is_empty() {
        lines.push("\n**Results:**".to_string());
        for name in results {
            lines.push(format!("- {name}"));
        }
    }

    if let Some(bracket) = &variant.bracket {
        lines.push(format!("\n**Bracket:** {bracket}"));
    }

    lines.push(format!(
        "\n[View on Commander Spellbook]({})",
        combo_url(&variant.id)
    ));

    lines.join("\n")
}

/// Resolve a decklist given as a URL or pasted text into card names.
///
/// Exactly one of `url` / `text` must be provided; the Spellbook import
/// endpoints do the actual parsing.
pub fn resolve_decklist(
    client: &SpellbookClient,
    url: Option<&str>,
    text: Option<&str>,
) -> Result<Vec<String>, ToolError> {
    let deck = if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        client.card_list_from_url(url).map_err(|e| {
            ToolError::execution_failed(format!(
                "Could not fetch decklist from URL ({e}). Make sure it's a valid Moxfield, Archidekt, or similar link."
            ))
        })?
    } else if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
        client
            .card_list_from_text(text)
            .map_err(|e| ToolError::execution_failed(format!("Could not parse the decklist text ({e})")))?
    } else {
        return Err(ToolError::invalid_arguments(
            "provide either a decklist URL or pasted card list",
        ));
    };

    let cards = deck.card_names();
    if cards.is_empty() {
        return Err(ToolError::invalid_arguments(
            "couldn't extract any cards from that decklist",
        ));
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SpellbookConfig;
    use httpmock::prelude::*;

    fn variant_fixture() -> Variant {
        serde_json::from_value(serde_json::json!({
            "id": "450-3551",
            "identity": "UB",
            "uses": [
                {"card": {"name": "Thassa's Oracle"}, "quantity": 1},
                {"card": {"name": "Demonic Consultation"}, "quantity": 1}
            ],
            "requires": [{"template": {"name": "A way to cast both spells"}}],
            "produces": [{"feature": {"name": "Win the game"}}],
            "description": "Cast Demonic Consultation naming a card not in your library. Cast Thassa's Oracle.",
            "bracket": 5
        }))
        .unwrap()
    }

    #[test]
    fn test_clamp_deck_limit() {
        assert_eq!(clamp_deck_limit(0), 1);
        assert_eq!(clamp_deck_limit(10), 10);
        assert_eq!(clamp_deck_limit(100), 20);
    }

    #[test]
    fn test_format_combo_sections() {
        let text = format_combo(&variant_fixture());
        assert!(text.contains("## Combo #450-3551"));
        assert!(text.contains("**Cards:** Thassa's Oracle, Demonic Consultation"));
        assert!(text.contains("**Color Identity:** UB"));
        assert!(text.contains("- A way to cast both spells"));
        assert!(text.contains("- Win the game"));
        assert!(text.contains("**Bracket:** 5"));
        assert!(text.contains("https://commanderspellbook.com/combo/450-3551"));
    }

    #[test]
    fn test_combo_summary_fields() {
        let summary = combo_summary(&variant_fixture());
        assert_eq!(summary.cards.len(), 2);
        assert_eq!(summary.results, vec!["Win the game"]);
        assert_eq!(summary.bracket.as_deref(), Some("5"));
        assert!(summary.missing_cards.is_empty());
    }

    #[test]
    fn test_resolve_decklist_requires_a_source() {
        let server = MockServer::start();
        let client = SpellbookClient::new(SpellbookConfig {
            base_url: server.base_url(),
            ..SpellbookConfig::default()
        });
        let err = resolve_decklist(&client, None, None).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_resolve_decklist_from_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/card-list-from-text/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"cards": [{"name": "Sol Ring"}, {"name": "Counterspell"}]}"#);
        });

        let client = SpellbookClient::new(SpellbookConfig {
            base_url: server.base_url(),
            ..SpellbookConfig::default()
        });
        let cards = resolve_decklist(&client, None, Some("1 Sol Ring\n1 Counterspell")).unwrap();
        assert_eq!(cards, vec!["Sol Ring", "Counterspell"]);
    }

    #[test]
    fn test_resolve_decklist_empty_import_is_invalid() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/card-list-from-url/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"cards": []}"#);
        });

        let client = SpellbookClient::new(SpellbookConfig {
            base_url: server.base_url(),
            ..SpellbookConfig::default()
        });
        let err = resolve_decklist(&client, Some("https://moxfield.com/decks/x"), None).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
