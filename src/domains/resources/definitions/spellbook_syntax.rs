//! Commander Spellbook search syntax reference resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Reference guide for Commander Spellbook's search syntax (static Markdown).
pub struct SpellbookSyntaxResource;

impl ResourceDefinition for SpellbookSyntaxResource {
    const URI: &'static str = "docs://spellbook/search-syntax";
    const NAME: &'static str = "Spellbook Combo Search Syntax";
    const DESCRIPTION: &'static str =
        "Reference for the query syntax accepted by the combo search tool";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(SYNTAX_GUIDE.to_string())
    }
}

const SYNTAX_GUIDE: &str = r#"# Commander Spellbook Search Syntax

Queries passed to `spellbook_search_combos` use Commander Spellbook's
search syntax.

## Common operators

- `card:"Thassa's Oracle"` - combos using a specific card
- `result:infinite` - combos producing a given result
- `prerequisites:` - text in the combo's setup requirements
- `steps:` - text in the combo's execution steps
- `cards=2` - combos with exactly that many cards

Plain words match across card names and combo text.

## Color identity

Use the tool's `color_identity` parameter with WUBRG letters instead of a
query operator: `UB` (Dimir), `GUR` (Temur), `WUBRG` (5-color). Matching
combos fit inside that identity.

## Related tools

- `spellbook_find_combos_for_cards` - analyze an explicit card list
- `spellbook_find_combos_in_decklist` - analyze a whole deck by URL or text
- `spellbook_get_combo` - full details for a combo id from search results
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_guide_metadata() {
        assert_eq!(
            SpellbookSyntaxResource::URI,
            "docs://spellbook/search-syntax"
        );
        assert_eq!(SpellbookSyntaxResource::MIME_TYPE, "text/markdown");
    }

    #[test]
    fn test_syntax_guide_mentions_card_operator() {
        match SpellbookSyntaxResource::content() {
            ResourceContent::Text(text) => {
                assert!(text.contains("card:"));
                assert!(text.contains("result:"));
            }
            _ => panic!("Expected Text content"),
        }
    }
}
