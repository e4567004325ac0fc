//! Shared card summarization and formatting for the Scryfall tools.

use schemars::JsonSchema;
use serde::Serialize;

use crate::core::api::scryfall::Card;

/// The summary view of a card returned as structured content.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CardSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,
    pub color_identity: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commander_legality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_usd_foil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scryfall_uri: Option<String>,
}

/// Reduce a full card object to its summary view.
pub fn card_summary(card: &Card) -> CardSummary {
    CardSummary {
        name: card.name.clone(),
        mana_cost: card.mana_cost.clone().filter(|c| !c.is_empty()),
        type_line: card.type_line.clone(),
        oracle_text: card.oracle_text.clone(),
        power: card.power.clone(),
        toughness: card.toughness.clone(),
        loyalty: card.loyalty.clone(),
        color_identity: card.color_identity.clone(),
        set_name: card.set_name.clone(),
        rarity: card.rarity.clone(),
        commander_legality: card.legalities.get("commander").cloned(),
        price_usd: card.prices.usd.clone(),
        price_usd_foil: card.prices.usd_foil.clone(),
        scryfall_uri: card.scryfall_uri.clone(),
    }
}

/// Render a card as readable Markdown.
pub fn format_card(card: &Card) -> String {
    let mut lines = Vec::new();

    let mana_cost = card.mana_cost.as_deref().unwrap_or("");
    lines.push(format!("## {} {}", card.name, mana_cost).trim_end().to_string());

    if let Some(type_line) = card.type_line.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("**{type_line}**"));
    }

    if let Some(oracle_text) = card.oracle_text.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("\n{oracle_text}"));
    }

    if let (Some(power), Some(toughness)) = (card.power.as_deref(), card.toughness.as_deref()) {
        lines.push(format!("\n**P/T:** {power}/{toughness}"));
    }

    if let Some(loyalty) = card.loyalty.as_deref() {
        lines.push(format!("\n**Starting Loyalty:** {loyalty}"));
    }

    if let Some(set_name) = card.set_name.as_deref() {
        let rarity = capitalize(card.rarity.as_deref().unwrap_or(""));
        lines.push(format!("\n*{set_name} ({rarity})*"));
    }

    let commander_legal = card
        .legalities
        .get("commander")
        .map(String::as_str)
        .unwrap_or("unknown");
    lines.push(format!("\n**Commander Legal:** {commander_legal}"));

    let mut price_parts = Vec::new();
    if let Some(usd) = card.prices.usd.as_deref() {
        price_parts.push(format!("${usd}"));
    }
    if let Some(usd_foil) = card.prices.usd_foil.as_deref() {
        price_parts.push(format!("${usd_foil} foil"));
    }
    if !price_parts.is_empty() {
        lines.push(format!("**Price:** {}", price_parts.join(" / ")));
    }

    if let Some(uri) = card.scryfall_uri.as_deref() {
        lines.push(format!("\n[View on Scryfall]({uri})"));
    }

    lines.join("\n")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creature_fixture() -> Card {
        serde_json::from_value(serde_json::json!({
            "id": "f295b713",
            "name": "Tarmogoyf",
            "mana_cost": "{1}{G}",
            "type_line": "Creature — Lhurgoyf",
            "oracle_text": "Tarmogoyf's power is equal to the number of card types among cards in all graveyards.",
            "power": "*",
            "toughness": "1+*",
            "color_identity": ["G"],
            "set_name": "Modern Horizons 2",
            "rarity": "mythic",
            "legalities": {"commander": "legal", "modern": "legal"},
            "prices": {"usd": "15.00", "usd_foil": "25.00"},
            "scryfall_uri": "https://scryfall.com/card/mh2/482"
        }))
        .unwrap()
    }

    #[test]
    fn test_format_card_includes_core_fields() {
        let text = format_card(&creature_fixture());
        assert!(text.contains("## Tarmogoyf {1}{G}"));
        assert!(text.contains("**Creature — Lhurgoyf**"));
        assert!(text.contains("**P/T:** */1+*"));
        assert!(text.contains("*Modern Horizons 2 (Mythic)*"));
        assert!(text.contains("**Commander Legal:** legal"));
        assert!(text.contains("**Price:** $15.00 / $25.00 foil"));
        assert!(text.contains("[View on Scryfall]"));
    }

    #[test]
    fn test_format_card_minimal() {
        let card: Card =
            serde_json::from_value(serde_json::json!({"id": "x", "name": "Some Card"})).unwrap();
        let text = format_card(&card);
        assert!(text.starts_with("## Some Card"));
        assert!(text.contains("**Commander Legal:** unknown"));
        assert!(!text.contains("P/T"));
        assert!(!text.contains("Price"));
    }

    #[test]
    fn test_card_summary_picks_commander_legality() {
        let summary = card_summary(&creature_fixture());
        assert_eq!(summary.commander_legality.as_deref(), Some("legal"));
        assert_eq!(summary.color_identity, vec!["G"]);
        assert_eq!(summary.price_usd.as_deref(), Some("15.00"));
    }
}
