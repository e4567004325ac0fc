//! Scryfall card database client.
//!
//! Thin wrapper over the Scryfall REST API covering the lookups the tools
//! need: full-text search, named lookup (exact or fuzzy), random card, and
//! rulings. Every request goes through the injected [`RateLimiter`] and the
//! shared decode path, so spacing and error mapping are uniform.
//!
//! Scryfall reports errors as a JSON object with a `details` field; that
//! text is propagated so the caller sees the upstream explanation (for
//! example which part of a search query was rejected).

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::rate_limit::RateLimiter;
use crate::core::config::ScryfallConfig;

// ============================================================================
// Response Types
// ============================================================================

/// The subset of a Scryfall card object the tools work with.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub legalities: std::collections::BTreeMap<String, String>,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub scryfall_uri: Option<String>,
}

/// Card price points in US dollars, as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
}

/// A page of search results.
#[derive(Debug, Clone, Deserialize)]
pub struct CardList {
    #[serde(default)]
    pub total_cards: Option<u64>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub data: Vec<Card>,
}

/// An official ruling attached to a card.
#[derive(Debug, Clone, Deserialize)]
pub struct Ruling {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub comment: String,
}

/// The list of rulings for one card.
#[derive(Debug, Clone, Deserialize)]
pub struct RulingList {
    #[serde(default)]
    pub data: Vec<Ruling>,
}

/// Scryfall's error envelope. Only `details` is interesting to callers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    details: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the Scryfall API.
///
/// Construct once and share; the limiter inside is the single piece of
/// mutable state and serializes request spacing across all callers.
#[derive(Debug)]
pub struct ScryfallClient {
    config: ScryfallConfig,
    limiter: RateLimiter,
}

impl ScryfallClient {
    /// Create a client from configuration.
    pub fn new(config: ScryfallConfig) -> Self {
        let limiter = RateLimiter::new(Duration::from_millis(config.min_interval_ms));
        Self { config, limiter }
    }

    /// Search cards with Scryfall's full-text syntax.
    ///
    /// The query is passed through verbatim; Scryfall itself validates the
    /// syntax. `order` selects a sort key (`name`, `cmc`, `edhrec`, ...).
    pub fn search_cards(&self, query: &str, order: Option<&str>) -> ApiResult<CardList> {
        if query.trim().is_empty() {
            return Err(ApiError::validation("search query must not be empty"));
        }

        let mut params = vec![("q", query)];
        if let Some(order) = order {
            params.push(("order", order));
        }
        self.get_json("/cards/search", &params)
    }

    /// Look up a single card by name.
    ///
    /// With `fuzzy` set, Scryfall tolerates typos and partial names and
    /// returns the closest match; otherwise the name must match exactly.
    /// `set_code` pins the lookup to a specific printing.
    pub fn named_card(&self, name: &str, fuzzy: bool, set_code: Option<&str>) -> ApiResult<Card> {
        if name.trim().is_empty() {
            return Err(ApiError::validation("card name must not be empty"));
        }

        let mode = if fuzzy { "fuzzy" } else { "exact" };
        let mut params = vec![(mode, name)];
        if let Some(set_code) = set_code {
            params.push(("set", set_code));
        }
        self.get_json("/cards/named", &params)
    }

    /// Fetch a random card, optionally filtered by a search query.
    pub fn random_card(&self, query: Option<&str>) -> ApiResult<Card> {
        let mut params = Vec::new();
        if let Some(query) = query {
            params.push(("q", query));
        }
        self.get_json("/cards/random", &params)
    }

    /// Fetch the rulings for a card by its Scryfall id.
    pub fn rulings(&self, card_id: &str) -> ApiResult<RulingList> {
        if card_id.trim().is_empty() {
            return Err(ApiError::validation("card id must not be empty"));
        }
        self.get_json(&format!("/cards/{card_id}/rulings"), &[])
    }

    /// Issue a rate-limited GET and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> ApiResult<T> {
        self.limiter.acquire();

        let url = format!("{}{}", self.config.base_url, path);
        debug!("GET {} ({} params)", url, params.len());

        let response = self
            .http_client()?
            .get(&url)
            .query(params)
            .send()
            .map_err(ApiError::from_transport)?;

        Self::decode(response)
    }

    /// Build the per-request HTTP client with the required headers.
    fn http_client(&self) -> ApiResult<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(user_agent) = HeaderValue::from_str(&self.config.user_agent) {
            headers.insert(USER_AGENT, user_agent);
        }

        Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))
    }

    /// Map the response status and body into the error taxonomy.
    fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.bytes().map_err(ApiError::from_transport)?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(Self::error_details(&body, status)));
        }
        if !status.is_success() {
            warn!("Scryfall answered HTTP {}", status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: Self::error_details(&body, status),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::parse(e.to_string()))
    }

    /// Extract the human-readable message from a Scryfall error body.
    fn error_details(body: &[u8], status: StatusCode) -> String {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|e| e.details)
            .unwrap_or_else(|| format!("HTTP {status}"))
    }
}

// ============================================================================
// Tests
// ============================================================================
