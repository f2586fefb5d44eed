//! Tip-split module configuration.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model used for tip suggestions.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Suggestion client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestionConfig {
    /// Base URL of the Gemini-compatible API (scheme and host, no path).
    pub base_url: String,
    /// Model identifier, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// API key sent as `x-goog-api-key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKey>,
    /// Timeout for the whole request, including reading the body.
    pub request_timeout_ms: u64,
    /// Maximum accepted response body size in bytes.
    pub max_response_bytes: usize,
    /// Permit plain `http://` endpoints. Only meant for local mock servers.
    pub allow_insecure_http: bool,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            request_timeout_ms: 30_000,
            max_response_bytes: 1024 * 1024, // 1 MiB
            allow_insecure_http: false,
        }
    }
}

/// Opaque wrapper around the API key.
///
/// `Debug`, `Display` and `Serialize` all print `[REDACTED]`; the inner value
/// is only reachable through [`expose`](Self::expose). The buffer is zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read-only access to the key. Callers must not log or persist it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self)
    }
}
