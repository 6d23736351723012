//! Core data model and configuration for linkpulse.
//!
//! Defines the canonical [`Post`] record with its engagement counters,
//! the keyword [`CategoryRules`] configuration consumed by the analysis
//! crate, and application configuration loaded from environment variables.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod post;
pub mod rules;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use post::{InteractionStats, Post};
pub use rules::{load_rules, CategoryRule, CategoryRules};

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
