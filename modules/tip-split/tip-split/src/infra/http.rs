//! Minimal HTTPS client for outbound JSON calls.
//!
//! A hyper-util pooled client over rustls. Only HTTPS is accepted unless the
//! transport is built with `allow_insecure_http`, which exists for local mock
//! servers. Each call is bounded by a single deadline covering connect, send
//! and body read, and the body is capped at `max_body_size` bytes.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{Request, StatusCode, Uri};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use thiserror::Error;
use tip_split_sdk::TipSplitError;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("tipsplit/", env!("CARGO_PKG_VERSION"));

/// Transport error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// Request building failed
    #[error("Failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    /// URL could not be used
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUri { url: String, reason: String },

    /// URL scheme rejected by the transport security mode
    #[error("URL scheme '{scheme}' not allowed: {reason}")]
    InvalidScheme { scheme: String, reason: String },

    /// Request did not complete before the deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Transport error (network, connection, etc)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// TLS setup error
    #[error("TLS error: {0}")]
    Tls(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body exceeded size limit
    #[error("Response body too large: limit {limit} bytes")]
    BodyTooLarge { limit: usize },
}

impl From<hyper_util::client::legacy::Error> for HttpError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        HttpError::Transport(Box::new(err))
    }
}

impl From<HttpError> for TipSplitError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout(after) => {
                TipSplitError::timeout(u64::try_from(after.as_millis()).unwrap_or(u64::MAX))
            }
            HttpError::InvalidUri { .. } | HttpError::InvalidScheme { .. } => {
                TipSplitError::not_configured(err.to_string())
            }
            HttpError::BodyTooLarge { .. } => TipSplitError::malformed(err.to_string()),
            HttpError::RequestBuild(_) => TipSplitError::internal(err.to_string()),
            HttpError::Transport(_) | HttpError::Tls(_) => {
                TipSplitError::transport(err.to_string())
            }
        }
    }
}

/// Transport settings.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub allow_insecure_http: bool,
}

/// Status and fully-read body of a response.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Pooled HTTPS client. Cloning is cheap and shares the pool.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: TransportConfig,
}

impl HttpTransport {
    /// Build the connector and connection pool.
    ///
    /// # Errors
    /// Returns `HttpError::Tls` if the TLS provider cannot be initialized.
    pub fn new(config: TransportConfig) -> Result<Self, HttpError> {
        if config.allow_insecure_http {
            tracing::warn!(
                "insecure HTTP enabled for the suggestion endpoint; use only with local mock servers"
            );
        }

        let https = build_https_connector(config.allow_insecure_http)?;
        let client = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .build::<_, Full<Bytes>>(https);

        Ok(Self { client, config })
    }

    /// POST a JSON body and read the whole response, whatever its status.
    ///
    /// # Errors
    /// Returns `HttpError` for an unusable URL, transport or TLS failures,
    /// timeouts and oversized bodies. Non-2xx statuses are not errors here.
    pub async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Bytes,
    ) -> Result<HttpReply, HttpError> {
        let uri = self.validate_url(url)?;

        let mut builder = Request::post(uri)
            .header(http::header::CONTENT_TYPE, "application/json")
            .header(http::header::ACCEPT, "application/json")
            .header(http::header::USER_AGENT, USER_AGENT);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Full::new(body))?;

        let timeout = self.config.request_timeout;
        tokio::time::timeout(timeout, self.send(request))
            .await
            .map_err(|_| HttpError::Timeout(timeout))?
    }

    async fn send(&self, request: Request<Full<Bytes>>) -> Result<HttpReply, HttpError> {
        let response = self.client.request(request).await?;
        let status = response.status();
        let body = read_body_limited(response.into_body(), self.config.max_body_size).await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(HttpReply { status, body })
    }

    fn validate_url(&self, url: &str) -> Result<Uri, HttpError> {
        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| HttpError::InvalidUri {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: url.to_owned(),
                reason: "missing host/authority".to_owned(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") if self.config.allow_insecure_http => Ok(uri),
            Some("http") => Err(HttpError::InvalidScheme {
                scheme: "http".to_owned(),
                reason: "HTTPS required".to_owned(),
            }),
            Some(scheme) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "only http:// and https:// schemes are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidUri {
                url: url.to_owned(),
                reason: "missing scheme".to_owned(),
            }),
        }
    }
}

async fn read_body_limited(body: hyper::body::Incoming, limit: usize) -> Result<Bytes, HttpError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(HttpError::BodyTooLarge { limit }),
        Err(e) => Err(HttpError::Transport(e)),
    }
}

/// Crypto provider for TLS: the process default if one is installed, aws-lc-rs otherwise.
fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

fn build_https_connector(
    allow_insecure_http: bool,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let builder = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(crypto_provider())
        .map_err(|e| HttpError::Tls(Box::new(e)))?;
    let connector = if allow_insecure_http {
        builder.https_or_http().enable_all_versions().build()
    } else {
        builder.https_only().enable_all_versions().build()
    };
    Ok(connector)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use httpmock::prelude::*;

    fn transport(allow_insecure_http: bool) -> HttpTransport {
        HttpTransport::new(TransportConfig {
            request_timeout: Duration::from_secs(5),
            max_body_size: 64,
            allow_insecure_http,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn rejects_plain_http_by_default() {
        let err = transport(false)
            .post_json("http://localhost:1/x", &[], Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::InvalidScheme { .. }));
    }

    #[tokio::test]
    async fn rejects_relative_and_foreign_urls() {
        let t = transport(true);
        let err = t.post_json("/relative", &[], Bytes::new()).await.unwrap_err();
        assert!(matches!(err, HttpError::InvalidUri { .. }));

        let err = t
            .post_json("ftp://example.com/x", &[], Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::InvalidScheme { .. }));
    }

    #[tokio::test]
    async fn posts_json_with_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/echo")
                .header("content-type", "application/json")
                .header("x-test", "1")
                .header("user-agent", USER_AGENT)
                .body("{\"a\":1}");
            then.status(201).body("{\"ok\":true}");
        });

        let reply = transport(true)
            .post_json(&server.url("/echo"), &[("x-test", "1")], Bytes::from("{\"a\":1}"))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(reply.body, Bytes::from("{\"ok\":true}"));
    }

    #[tokio::test]
    async fn error_statuses_are_returned_not_raised() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/fail");
            then.status(503).body("busy");
        });

        let reply = transport(true)
            .post_json(&server.url("/fail"), &[], Bytes::new())
            .await
            .unwrap();
        assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/large");
            then.status(200).body("x".repeat(1024));
        });

        let err = transport(true)
            .post_json(&server.url("/large"), &[], Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::BodyTooLarge { limit: 64 }));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/slow");
            then.status(200).delay(Duration::from_millis(500));
        });

        let t = HttpTransport::new(TransportConfig {
            request_timeout: Duration::from_millis(50),
            max_body_size: 64,
            allow_insecure_http: true,
        })
        .unwrap();
        let err = t
            .post_json(&server.url("/slow"), &[], Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Timeout(_)));
    }

    #[test]
    fn timeout_maps_to_sdk_timeout() {
        let err: TipSplitError = HttpError::Timeout(Duration::from_millis(1500)).into();
        assert_eq!(err, TipSplitError::timeout(1500));

        let err: TipSplitError = HttpError::BodyTooLarge { limit: 8 }.into();
        assert!(matches!(err, TipSplitError::MalformedResponse { .. }));
    }
}
