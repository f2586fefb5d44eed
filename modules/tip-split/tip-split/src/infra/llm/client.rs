//! Gemini-backed implementation of [`TipSuggestionClientV1`].

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tip_split_sdk::{SuggestionRequest, SuggestionResult, TipSplitError, TipSuggestionClientV1};
use tracing::{debug, info, instrument};

use super::dto::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use super::prompt;
use crate::config::{ApiKey, SuggestionConfig};
use crate::infra::http::{HttpTransport, TransportConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_PREVIEW_CHARS: usize = 200;

/// Calls `models/{model}:generateContent` once per suggestion.
#[derive(Clone)]
pub struct GeminiSuggestionClient {
    transport: HttpTransport,
    endpoint: String,
    model: String,
    api_key: ApiKey,
}

impl std::fmt::Debug for GeminiSuggestionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSuggestionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

impl GeminiSuggestionClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// `TipSplitError::NotConfigured` when the API key, base URL or model is
    /// missing; `TipSplitError::Transport` if the TLS stack cannot start.
    pub fn new(config: &SuggestionConfig) -> Result<Self, TipSplitError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_blank())
            .ok_or_else(|| TipSplitError::not_configured("missing API key"))?;

        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(TipSplitError::not_configured("missing base URL"));
        }
        let model = config.model.trim();
        if model.is_empty() {
            return Err(TipSplitError::not_configured("missing model"));
        }

        let transport = HttpTransport::new(TransportConfig {
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            max_body_size: config.max_response_bytes,
            allow_insecure_http: config.allow_insecure_http,
        })?;

        Ok(Self {
            transport,
            endpoint: format!("{base_url}/v1beta/models/{model}:generateContent"),
            model: model.to_owned(),
            api_key,
        })
    }

    /// Full URL the client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TipSuggestionClientV1 for GeminiSuggestionClient {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResult, TipSplitError> {
        let body = serde_json::to_vec(&GenerateContentRequest::tip_suggestion(prompt::render(
            request,
        )))
        .map_err(|e| TipSplitError::internal(format!("failed to encode request: {e}")))?;

        debug!(bill_amount = request.bill_amount, "requesting tip suggestion");
        let reply = self
            .transport
            .post_json(
                &self.endpoint,
                &[(API_KEY_HEADER, self.api_key.expose())],
                Bytes::from(body),
            )
            .await?;

        if !reply.status.is_success() {
            return Err(TipSplitError::upstream(
                reply.status.as_u16(),
                error_message(&reply.body),
            ));
        }

        let response: GenerateContentResponse = serde_json::from_slice(&reply.body)
            .map_err(|e| TipSplitError::malformed(format!("invalid response body: {e}")))?;
        let Some(text) = response.first_text() else {
            let reason = response
                .candidates
                .first()
                .and_then(|candidate| candidate.finish_reason.as_deref())
                .unwrap_or("none");
            return Err(TipSplitError::malformed(format!(
                "response carried no text (finish reason: {reason})"
            )));
        };

        let suggestion = parse_suggestion(&text)?;
        info!(
            suggested_tip_percentage = suggestion.suggested_tip_percentage,
            "tip suggestion received"
        );
        Ok(suggestion)
    }
}

/// Parse the model's JSON answer, tolerating a surrounding code fence.
fn parse_suggestion(text: &str) -> Result<SuggestionResult, TipSplitError> {
    let suggestion: SuggestionResult = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| TipSplitError::malformed(format!("unexpected suggestion shape: {e}")))?;

    if !suggestion.is_in_range() {
        return Err(TipSplitError::malformed(format!(
            "suggested tip {} is outside 0..=1",
            suggestion.suggested_tip_percentage
        )));
    }
    Ok(suggestion)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn error_message(body: &[u8]) -> String {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return match envelope.error.status {
            Some(status) => format!("{status}: {}", envelope.error.message),
            None => envelope.error.message,
        };
    }
    String::from_utf8_lossy(body)
        .chars()
        .take(ERROR_PREVIEW_CHARS)
        .collect()
}
