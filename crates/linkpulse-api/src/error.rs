use thiserror::Error;

/// Errors returned by the LinkedIn API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The LinkedIn API responded with an error status after the retry
    /// budget was exhausted. `details` carries the parsed error body when
    /// the upstream returned JSON.
    #[error("LinkedIn API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL does not parse.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}
