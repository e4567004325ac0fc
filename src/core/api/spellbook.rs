//! Commander Spellbook combo database client.
//!
//! Covers the endpoints the combo tools use: variant search and lookup,
//! decklist import (from a URL or pasted text), combo analysis over a card
//! list, and bracket estimation. Combo analysis inspects whole decklists
//! server-side, so POSTs get a longer timeout than GETs.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use crate::core::config::SpellbookConfig;

// ============================================================================
// Response Types
// ============================================================================

/// A named entity referenced by a combo (card, template, or feature).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntity {
    #[serde(default)]
    pub name: String,
}

/// A card a combo uses.
#[derive(Debug, Clone, Deserialize)]
pub struct CardUse {
    #[serde(default)]
    pub card: Option<NamedEntity>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// A generic requirement beyond specific cards ("a creature you control", ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateUse {
    #[serde(default)]
    pub template: Option<NamedEntity>,
}

/// An effect the combo produces.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureUse {
    #[serde(default)]
    pub feature: Option<NamedEntity>,
}

/// Bracket levels arrive either as a number or a label, depending on endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BracketValue {
    Number(u64),
    Text(String),
}

impl fmt::Display for BracketValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A combo variant: a specific set of cards producing a set of effects.
#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub id: String,
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub uses: Vec<CardUse>,
    #[serde(default)]
    pub requires: Vec<TemplateUse>,
    #[serde(default)]
    pub produces: Vec<FeatureUse>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bracket: Option<BracketValue>,
    /// Cards still needed; populated only in "almost included" analysis results.
    #[serde(default)]
    pub missing: Vec<CardUse>,
}

impl Variant {
    /// Names of the cards this variant uses.
    pub fn card_names(&self) -> Vec<&str> {
        self.uses
            .iter()
            .filter_map(|u| u.card.as_ref())
            .map(|c| c.name.as_str())
            .collect()
    }
}

/// A page of variant search results.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantList {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub results: Vec<Variant>,
}

/// Result of analyzing a card list for combos.
#[derive(Debug, Clone, Deserialize)]
pub struct ComboAnalysis {
    pub results: ComboAnalysisResults,
}

/// The analysis buckets: combos fully present vs. missing one card.
///
/// `included` holds exactly the combos whose required cards are a subset of
/// the submitted list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComboAnalysisResults {
    #[serde(default)]
    pub included: Vec<Variant>,
    #[serde(default)]
    pub almost_included: Vec<Variant>,
}

/// One entry of an imported decklist. The import endpoints are loose about
/// shape: entries arrive as `{"name": ...}`, `{"card": ...}`, or a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeckEntry {
    Named { name: String },
    Card { card: String },
    Plain(String),
}

impl DeckEntry {
    /// The card name regardless of which shape the entry arrived in.
    pub fn name(&self) -> &str {
        match self {
            Self::Named { name } => name,
            Self::Card { card } => card,
            Self::Plain(name) => name,
        }
    }
}

/// An imported decklist.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckList {
    #[serde(default)]
    pub cards: Vec<DeckEntry>,
}

impl DeckList {
    /// Non-empty card names in deck order.
    pub fn card_names(&self) -> Vec<String> {
        self.cards
            .iter()
            .map(|entry| entry.name().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Commander bracket estimate for a decklist.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketEstimate {
    #[serde(default)]
    pub bracket: Option<BracketValue>,
    #[serde(default)]
    pub combos_by_bracket: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub two_card_combos: Vec<Variant>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the Commander Spellbook backend.
///
/// Stateless apart from configuration; Spellbook imposes no request spacing.
#[derive(Debug)]
pub struct SpellbookClient {
    config: SpellbookConfig,
}

impl SpellbookClient {
    /// Create a client from configuration.
    pub fn new(config: SpellbookConfig) -> Self {
        Self { config }
    }

    /// Search combo variants with Spellbook's query syntax.
    ///
    /// `color_identity` narrows results to combos castable within the given
    /// WUBRG letters.
    pub fn search_variants(
        &self,
        query: &str,
        color_identity: Option<&str>,
        limit: usize,
    ) -> ApiResult<VariantList> {
        if query.trim().is_empty() {
            return Err(ApiError::validation("search query must not be empty"));
        }

        let mut params = vec![
            ("q", query.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(identity) = color_identity {
            params.push(("id", identity.to_uppercase()));
        }
        self.get_json("/variants", &params)
    }

    /// Fetch a single combo variant by id.
    pub fn variant(&self, id: &str) -> ApiResult<Variant> {
        if id.trim().is_empty() {
            return Err(ApiError::validation("combo id must not be empty"));
        }
        self.get_json(&format!("/variants/{id}"), &[])
    }

    /// Analyze a card list for combos it contains or nearly contains.
    pub fn find_my_combos(&self, cards: &[String]) -> ApiResult<ComboAnalysis> {
        if cards.is_empty() {
            return Err(ApiError::validation("card list must not be empty"));
        }
        self.post_json("/find-my-combos/", json!({ "cards": cards }))
    }

    /// Import a decklist from a deck-building site URL.
    pub fn card_list_from_url(&self, url: &str) -> ApiResult<DeckList> {
        if url.trim().is_empty() {
            return Err(ApiError::validation("decklist URL must not be empty"));
        }
        self.post_json("/card-list-from-url/", json!({ "url": url }))
    }

    /// Import a decklist from pasted text, one card per line.
    pub fn card_list_from_text(&self, text: &str) -> ApiResult<DeckList> {
        if text.trim().is_empty() {
            return Err(ApiError::validation("decklist text must not be empty"));
        }
        self.post_json("/card-list-from-text/", json!({ "text": text }))
    }

    /// Estimate the Commander bracket for a card list.
    pub fn estimate_bracket(&self, cards: &[String]) -> ApiResult<BracketEstimate> {
        if cards.is_empty() {
            return Err(ApiError::validation("card list must not be empty"));
        }
        self.post_json("/estimate-bracket/", json!({ "cards": cards }))
    }

    /// Issue a GET and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> ApiResult<T> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http_client(self.config.timeout_secs)?
            .get(&url)
            .query(params)
            .send()
            .map_err(ApiError::from_transport)?;

        Self::decode(response)
    }

    /// Issue a POST with a JSON body and decode the JSON response.
    fn post_json<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> ApiResult<T> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http_client(self.config.analysis_timeout_secs)?
            .post(&url)
            .json(&body)
            .send()
            .map_err(ApiError::from_transport)?;

        Self::decode(response)
    }

    fn http_client(&self, timeout_secs: u64) -> ApiResult<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))
    }

    /// Map the response status and body into the error taxonomy.
    fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.bytes().map_err(ApiError::from_transport)?;

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(Self::error_message(&body, status)));
        }
        if !status.is_success() {
            warn!("Spellbook answered HTTP {}", status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: Self::error_message(&body, status),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::parse(e.to_string()))
    }

    /// Best-effort upstream message: short body text, or the bare status.
    fn error_message(body: &[u8], status: StatusCode) -> String {
        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        if text.is_empty() || text.len() > 200 {
            format!("HTTP {status}")
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
