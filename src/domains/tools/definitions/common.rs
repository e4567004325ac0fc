//! Common utilities shared across tool definitions.
//!
//! This module provides shared functionality like result construction
//! and search-limit clamping.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use tracing::warn;

/// Default limit for search results.
pub fn default_limit() -> usize {
    10
}

/// Validate and clamp a search limit to the allowed range (1-50).
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, 50)
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a result carrying both a readable text body and structured data.
pub fn structured_result<T: Serialize>(text: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(text)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize structured content: {}", e);
            // Fallback to text-only
            CallToolResult::success(vec![Content::text(text)])
        }
    }
}
