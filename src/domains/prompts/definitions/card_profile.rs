//! Card profile prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Build a complete profile of a single card.
pub struct CardProfilePrompt;

impl PromptDefinition for CardProfilePrompt {
    const NAME: &'static str = "card_profile";
    const DESCRIPTION: &'static str =
        "Research a card: text, rulings, and the combos it enables";

    fn template() -> &'static str {
        r#"Build a profile of the card "{{card_name}}".

1. Look it up with scryfall_get_card (fuzzy matching is fine).
2. Fetch its official rulings with scryfall_get_rulings and summarize the
   ones that matter in practice.
3. Search spellbook_search_combos with card:"{{card_name}}" to see which
   combos it enables.

Finish with a short verdict on where the card shines{{#if deck_context}},
specifically for this deck: {{deck_context}}{{/if}}."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "card_name".to_string(),
                title: None,
                description: Some("Name of the card to research".to_string()),
                required: Some(true),
            },
            PromptArgument {
                name: "deck_context".to_string(),
                title: None,
                description: Some(
                    "Optional deck or strategy to evaluate the card against".to_string(),
                ),
                required: Some(false),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_profile_prompt_metadata() {
        assert_eq!(CardProfilePrompt::NAME, "card_profile");
        assert!(CardProfilePrompt::template().contains("{{card_name}}"));

        let args = CardProfilePrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "card_name");
        assert_eq!(args[0].required, Some(true));
    }
}
