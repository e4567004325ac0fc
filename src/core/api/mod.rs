//! Upstream API clients for the card and combo databases.
//!
//! This module is the outbound request pipeline shared by every tool:
//! it builds query strings, enforces request spacing for Scryfall, issues
//! the HTTP call, and decodes the JSON body into typed summaries.
//!
//! - `scryfall` - Scryfall card database client (rate limited)
//! - `spellbook` - Commander Spellbook combo database client
//! - `rate_limit` - minimum-interval request spacing
//! - `error` - the error taxonomy surfaced to tools

mod error;
pub mod rate_limit;
pub mod scryfall;
pub mod spellbook;

pub use error::{ApiError, ApiResult};
pub use rate_limit::RateLimiter;
pub use scryfall::ScryfallClient;
pub use spellbook::SpellbookClient;
