//! Deck combo analysis prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Walk through the combos available in a decklist.
pub struct DeckCombosPrompt;

impl PromptDefinition for DeckCombosPrompt {
    const NAME: &'static str = "deck_combos";
    const DESCRIPTION: &'static str = "Analyze the combos present in a decklist";

    fn template() -> &'static str {
        r#"Analyze the combos in this deck:

{{decklist}}

Use spellbook_find_combos_in_decklist to find complete and almost-complete
combos{{#if focus}}, paying special attention to {{focus}}{{/if}}. For each
complete combo, explain how to assemble and execute it. For almost-complete
combos, say which card is missing and whether adding it fits the deck."#
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            PromptArgument {
                name: "decklist".to_string(),
                title: None,
                description: Some(
                    "The decklist: a deck URL or one card per line".to_string(),
                ),
                required: Some(true),
            },
            PromptArgument {
                name: "focus".to_string(),
                title: None,
                description: Some(
                    "Optional focus, e.g. 'infinite mana' or 'win conditions'".to_string(),
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
    fn test_deck_combos_prompt_metadata() {
        assert_eq!(DeckCombosPrompt::NAME, "deck_combos");
        assert!(!DeckCombosPrompt::DESCRIPTION.is_empty());
        assert!(DeckCombosPrompt::template().contains("{{decklist}}"));

        let args = DeckCombosPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "decklist");
        assert_eq!(args[0].required, Some(true));
        assert_eq!(args[1].required, Some(false));
    }
}
