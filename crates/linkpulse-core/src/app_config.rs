use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub access_token: Option<String>,
    pub api_version: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub inter_request_delay_ms: u64,
    pub retry_backoff_base_ms: u64,
    pub rules_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("rules_path", &self.rules_path)
            .finish()
    }
}
