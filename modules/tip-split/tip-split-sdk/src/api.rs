//! Suggestion client API trait.

use async_trait::async_trait;

use crate::error::TipSplitError;
use crate::models::{SuggestionRequest, SuggestionResult};

/// Client for the external tip-suggestion service.
///
/// Implementations perform exactly one outbound request per call: no retries,
/// no caching, no batching. Callers validate the request before invoking it.
#[async_trait]
pub trait TipSuggestionClientV1: Send + Sync {
    /// Ask the service for a tip percentage matching the described service quality.
    ///
    /// # Errors
    /// Returns `TipSplitError` when the suggestion could not be obtained
    /// (transport failure, timeout, non-success status or a malformed answer).
    async fn suggest(&self, request: &SuggestionRequest)
    -> Result<SuggestionResult, TipSplitError>;
}
