//! Scryfall card database tools.
//!
//! This module provides tools backed by the Scryfall API:
//! - `search`: full-text card search with Scryfall's query syntax
//! - `named`: single-card lookup by exact or fuzzy name
//! - `random`: random card, optionally filtered
//! - `rulings`: official rulings for a card
//!
//! All tools share the rate-limited [`ScryfallClient`] injected by the router.
//!
//! [`ScryfallClient`]: crate::core::api::ScryfallClient

pub mod common;
pub mod named;
pub mod random;
pub mod rulings;
pub mod search;

pub use named::{ScryfallNamedParams, ScryfallNamedTool};
pub use random::{ScryfallRandomParams, ScryfallRandomTool};
pub use rulings::{ScryfallRulingsParams, ScryfallRulingsTool};
pub use search::{ScryfallSearchParams, ScryfallSearchTool};
