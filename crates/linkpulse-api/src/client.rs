//! HTTP client for the LinkedIn REST API.
//!
//! Wraps `reqwest` with LinkedIn-specific headers, offset pagination over
//! the posts collection, per-post engagement hydration, and retry with
//! back-off on transient failures. Terminal upstream errors surface as
//! [`ApiError::Api`] carrying the HTTP status and the parsed error body.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde_json::Value;

use linkpulse_core::{AppConfig, Post};

use crate::error::ApiError;
use crate::normalize::{normalize_post, parse_interaction_stats};
use crate::retry::retry_with_backoff;
use crate::types::{PostsPage, SocialActions};

const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/rest/";

/// The posts collection caps page size at 100 elements.
const MAX_PAGE_SIZE: usize = 100;

/// Percent-encode everything in a URN except unreserved characters, so the
/// colon-separated identifier is safe as a single path segment.
const URN_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for the LinkedIn REST API.
///
/// Use [`LinkedInClient::new`] for production or
/// [`LinkedInClient::with_base_url`] to point at a mock server in tests.
pub struct LinkedInClient {
    client: Client,
    access_token: String,
    api_version: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
    inter_request_delay_ms: u64,
}

impl LinkedInClient {
    /// Creates a new client pointed at the production LinkedIn API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        Self::with_base_url(access_token, api_version, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("linkpulse/0.1 (post-performance)")
            .build()?;

        // Normalise: the base URL must end with exactly one slash so path
        // concatenation appends segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ApiError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            api_version: api_version.to_owned(),
            base_url,
            max_retries: 3,
            backoff_base_ms: 1_000,
            inter_request_delay_ms: 200,
        })
    }

    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed. A missing access token is the caller's
    /// problem to report; this constructor uses an empty one.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let token = config.access_token.as_deref().unwrap_or_default();
        let client = Self::new(token, &config.api_version, config.request_timeout_secs)?;
        Ok(client
            .with_retry_policy(config.max_retries, config.retry_backoff_base_ms)
            .with_inter_request_delay(config.inter_request_delay_ms))
    }

    /// Overrides the retry budget and back-off base.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Overrides the pause between successive upstream calls.
    #[must_use]
    pub fn with_inter_request_delay(mut self, delay_ms: u64) -> Self {
        self.inter_request_delay_ms = delay_ms;
        self
    }

    /// Fetches up to `limit` posts authored by the organization, newest
    /// modified first, normalized into [`Post`] records with zero-valued
    /// stats.
    ///
    /// Pages through the collection in batches of at most 100, pacing
    /// between page requests, and stops early when the response carries no
    /// `rel="next"` link.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Api`] if the API reports a terminal error after the
    ///   retry budget is exhausted.
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Deserialize`] if a page does not match the expected
    ///   envelope.
    pub async fn fetch_posts(
        &self,
        organization_urn: &str,
        limit: usize,
        lifecycle_state: &str,
    ) -> Result<Vec<Post>, ApiError> {
        let mut collected: Vec<Post> = Vec::new();
        let mut start = 0usize;

        while collected.len() < limit {
            let count = (limit - collected.len()).min(MAX_PAGE_SIZE);
            let url = self.build_url(
                "posts",
                &[
                    ("q", "author"),
                    ("author", organization_urn),
                    ("start", &start.to_string()),
                    ("count", &count.to_string()),
                    ("lifecycleState", lifecycle_state),
                    ("sortBy", "LAST_MODIFIED"),
                ],
            );

            let body = self.request_json(&url).await?;
            let page: PostsPage =
                serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                    context: format!("posts(start={start})"),
                    source: e,
                })?;

            let fetched = page.elements.len();
            tracing::debug!(fetched, start, "fetched posts page");
            for element in &page.elements {
                collected.push(normalize_post(element));
            }

            // An empty page with a next link would loop forever; treat it
            // as the end of the collection.
            if !page.has_next_page() || fetched == 0 {
                break;
            }

            start += fetched;
            self.pace().await;
        }

        Ok(collected)
    }

    /// Populates interaction metrics for each post from the
    /// `socialActions` endpoint.
    ///
    /// Input order is preserved. Posts without a resolvable identity are
    /// passed through unchanged. Each hydrated post is a new record; the
    /// input records are consumed, not mutated in place.
    ///
    /// # Errors
    ///
    /// Same as [`LinkedInClient::fetch_posts`]; a terminal error aborts
    /// the whole hydration pass.
    pub async fn hydrate_engagement(&self, posts: Vec<Post>) -> Result<Vec<Post>, ApiError> {
        let mut hydrated = Vec::with_capacity(posts.len());

        for post in posts {
            let urn = if post.id.is_empty() {
                post.raw
                    .get("urn")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            } else {
                post.id.clone()
            };

            if urn.is_empty() {
                tracing::debug!("post without identity, skipping engagement lookup");
                hydrated.push(post);
                continue;
            }

            let encoded = utf8_percent_encode(&urn, URN_SEGMENT).to_string();
            let url = self.build_url(&format!("socialActions/{encoded}"), &[]);
            let body = self.request_json(&url).await?;
            let summary: SocialActions =
                serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
                    context: format!("socialActions({urn})"),
                    source: e,
                })?;

            hydrated.push(post.with_stats(parse_interaction_stats(&summary)));
            self.pace().await;
        }

        Ok(hydrated)
    }

    /// Builds the full request URL. `path` is appended to the base path;
    /// query parameters are percent-encoded via [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{path}", self.base_url.path()));
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request through the retry helper.
    async fn request_json(&self, url: &Url) -> Result<Value, ApiError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.send_once(url)
        })
        .await
    }

    /// One GET attempt: 2xx parses as JSON, anything else becomes
    /// [`ApiError::Api`] with the body retained as message and details.
    async fn send_once(&self, url: &Url) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .header("LinkedIn-Version", &self.api_version)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
                context: url.path().to_string(),
                source: e,
            });
        }

        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            body.clone()
        };

        Err(ApiError::Api {
            status: status.as_u16(),
            message,
            details: serde_json::from_str(&body).ok(),
        })
    }

    async fn pace(&self) {
        if self.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.inter_request_delay_ms)).await;
        }
    }
}
