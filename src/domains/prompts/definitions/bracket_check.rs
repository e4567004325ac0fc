//! Bracket check prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Assess a deck's Commander bracket and what drives it.
pub struct BracketCheckPrompt;

impl PromptDefinition for BracketCheckPrompt {
    const NAME: &'static str = "bracket_check";
    const DESCRIPTION: &'static str =
        "Estimate a deck's Commander bracket and explain the drivers";

    fn template() -> &'static str {
        r#"Estimate the power level of this deck:

{{decklist}}

Run spellbook_estimate_bracket on it. Explain which two-card combos push the
bracket up, and what the per-bracket combo counts say about consistency.
{{#if target_bracket}}The owner is aiming for bracket {{target_bracket}};
suggest swaps that would move the deck toward it.{{/if}}"#
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
                name: "target_bracket".to_string(),
                title: None,
                description: Some("Optional bracket (1-4) the deck should land in".to_string()),
                required: Some(false),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_check_prompt_metadata() {
        assert_eq!(BracketCheckPrompt::NAME, "bracket_check");
        assert!(BracketCheckPrompt::template().contains("spellbook_estimate_bracket"));

        let args = BracketCheckPrompt::arguments();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].required, Some(true));
    }
}
