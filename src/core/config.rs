//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default Scryfall API endpoint.
const SCRYFALL_API: &str = "https://api.scryfall.com";

/// Default Commander Spellbook API endpoint.
const SPELLBOOK_API: &str = "https://backend.commanderspellbook.com";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Scryfall card database API configuration.
    pub scryfall: ScryfallConfig,

    /// Commander Spellbook combo database API configuration.
    pub spellbook: SpellbookConfig,

    /// Resources domain configuration.
    pub resources: ResourcesConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the Scryfall API client.
///
/// Scryfall requires a User-Agent header and asks clients to leave
/// 50-100ms between requests, so the spacing interval lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScryfallConfig {
    /// Base URL of the Scryfall API.
    pub base_url: String,

    /// User-Agent header sent with every request (required by Scryfall).
    pub user_agent: String,

    /// Minimum spacing between consecutive requests, in milliseconds.
    pub min_interval_ms: u64,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Configuration for the Commander Spellbook API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellbookConfig {
    /// Base URL of the Commander Spellbook backend.
    pub base_url: String,

    /// Per-request timeout in seconds for lookups and searches.
    pub timeout_secs: u64,

    /// Timeout in seconds for combo analysis requests, which scan
    /// whole decklists and take longer server-side.
    pub analysis_timeout_secs: u64,
}

/// Configuration for the resources domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    // Resources are registered in domains/resources/registry.rs
    // Add resource-specific configuration here if needed.
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    // Prompts are registered in domains/prompts/registry.rs
    // Add prompt-specific configuration here if needed.
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ScryfallConfig {
    fn default() -> Self {
        Self {
            base_url: SCRYFALL_API.to_string(),
            user_agent: format!("mtg-mcp-server/{}", env!("CARGO_PKG_VERSION")),
            min_interval_ms: 100,
            timeout_secs: 30,
        }
    }
}

impl Default for SpellbookConfig {
    fn default() -> Self {
        Self {
            base_url: SPELLBOOK_API.to_string(),
            timeout_secs: 30,
            analysis_timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mtg-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            scryfall: ScryfallConfig::default(),
            spellbook: SpellbookConfig::default(),
            resources: ResourcesConfig::default(),
            prompts: PromptsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_SCRYFALL_BASE_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("MCP_SCRYFALL_BASE_URL") {
            info!("Scryfall base URL overridden: {}", base_url);
            config.scryfall.base_url = base_url;
        }

        if let Ok(user_agent) = std::env::var("MCP_SCRYFALL_USER_AGENT") {
            config.scryfall.user_agent = user_agent;
        }

        if let Ok(interval) = std::env::var("MCP_SCRYFALL_MIN_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                config.scryfall.min_interval_ms = ms;
            }
        }

        if let Ok(timeout) = std::env::var("MCP_SCRYFALL_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.scryfall.timeout_secs = secs;
            }
        }

        if let Ok(base_url) = std::env::var("MCP_SPELLBOOK_BASE_URL") {
            info!("Spellbook base URL overridden: {}", base_url);
            config.spellbook.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_SPELLBOOK_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.spellbook.timeout_secs = secs;
            }
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_endpoints() {
        let config = Config::default();
        assert_eq!(config.scryfall.base_url, "https://api.scryfall.com");
        assert_eq!(
            config.spellbook.base_url,
            "https://backend.commanderspellbook.com"
        );
    }

    #[test]
    fn test_default_rate_limit_interval() {
        let config = Config::default();
        assert_eq!(config.scryfall.min_interval_ms, 100);
    }

    #[test]
    fn test_scryfall_base_url_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SCRYFALL_BASE_URL", "http://localhost:9999");
        }
        let config = Config::from_env();
        assert_eq!(config.scryfall.base_url, "http://localhost:9999");
        unsafe {
            std::env::remove_var("MCP_SCRYFALL_BASE_URL");
        }
    }

    #[test]
    fn test_min_interval_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SCRYFALL_MIN_INTERVAL_MS", "250");
        }
        let config = Config::from_env();
        assert_eq!(config.scryfall.min_interval_ms, 250);
        unsafe {
            std::env::remove_var("MCP_SCRYFALL_MIN_INTERVAL_MS");
        }
    }

    #[test]
    fn test_invalid_interval_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SCRYFALL_MIN_INTERVAL_MS", "not-a-number");
        }
        let config = Config::from_env();
        assert_eq!(config.scryfall.min_interval_ms, 100);
        unsafe {
            std::env::remove_var("MCP_SCRYFALL_MIN_INTERVAL_MS");
        }
    }

    #[test]
    fn test_user_agent_identifies_server() {
        let config = Config::default();
        assert!(config.scryfall.user_agent.starts_with("mtg-mcp-server/"));
    }
}
