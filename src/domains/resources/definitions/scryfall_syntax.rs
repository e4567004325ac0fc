//! Scryfall search syntax reference resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Reference guide for Scryfall's search syntax (static Markdown).
pub struct ScryfallSyntaxResource;

impl ResourceDefinition for ScryfallSyntaxResource {
    const URI: &'static str = "docs://scryfall/search-syntax";
    const NAME: &'static str = "Scryfall Search Syntax";
    const DESCRIPTION: &'static str =
        "Reference for the query syntax accepted by the card search tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(SYNTAX_GUIDE.to_string())
    }
}

const SYNTAX_GUIDE: &str = r#"# Scryfall Search Syntax

Queries passed to `scryfall_search_cards` and the `query` filter of
`scryfall_random_card` use Scryfall's search syntax.

## Common operators

- `c:` or `color:` - card color (`c:blue`, `c:UR` for blue/red)
- `id:` or `identity:` - color identity for Commander (`id:simic`, `id:UB`)
- `t:` or `type:` - card type (`t:creature`, `t:instant`, `t:legendary`)
- `o:` or `oracle:` - oracle text contains (`o:"draw a card"`)
- `cmc:` or `mv:` - mana value (`cmc<=3`, `mv=5`)
- `pow:` and `tou:` - power/toughness (`pow>=4`)
- `r:` or `rarity:` - rarity (`r:mythic`)
- `is:commander` - can be a commander
- `f:` or `format:` - legal in a format (`f:commander`)
- `usd<=` - price filter (`usd<=5`)

## Examples

- `c:green t:creature pow>=5` - green creatures with 5+ power
- `o:"draw a card" id:izzet` - Izzet-identity cards with draw effects
- `t:legendary t:creature id:simic` - Simic legendary creatures
- `is:commander usd<=10` - budget commanders

Operators combine with spaces (AND) and `or`. Negate with `-`.
"#;
