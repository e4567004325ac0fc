//! Commander Spellbook combo tools.
//!
//! This module provides tools backed by the Commander Spellbook API:
//! - `search`: combo search with Spellbook's query syntax
//! - `find_combos`: combo analysis over an explicit card list
//! - `combo`: single combo lookup by id
//! - `decklist`: combo analysis over an imported decklist (URL or text)
//! - `bracket`: Commander bracket estimation for a decklist
//!
//! All tools share the [`SpellbookClient`] injected by the router.
//!
//! [`SpellbookClient`]: crate::core::api::SpellbookClient

pub mod bracket;
pub mod combo;
pub mod common;
pub mod decklist;
pub mod find_combos;
pub mod search;

pub use bracket::{SpellbookBracketParams, SpellbookBracketTool};
pub use combo::{SpellbookComboParams, SpellbookComboTool};
pub use decklist::{SpellbookDecklistParams, SpellbookDecklistTool};
pub use find_combos::{SpellbookFindCombosParams, SpellbookFindCombosTool};
pub use search::{SpellbookSearchParams, SpellbookSearchTool};
