//! LinkedIn REST API client for linkpulse.
//!
//! Fetches an organization's posts page by page, normalizes the two known
//! payload schema generations into the canonical [`linkpulse_core::Post`]
//! record, and hydrates engagement metrics from the `socialActions`
//! endpoint. Transient upstream failures are retried with back-off;
//! terminal ones surface as [`ApiError::Api`] with status and details.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod retry;

pub use client::LinkedInClient;
pub use error::ApiError;
pub use normalize::{normalize_post, parse_interaction_stats};
