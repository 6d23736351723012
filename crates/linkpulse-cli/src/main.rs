//! Command line interface: fetch, hydrate, analyze, render.

mod report;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono::{Duration, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use linkpulse_analysis::{analyze_posts, AnalyzeOptions};
use linkpulse_api::LinkedInClient;
use linkpulse_core::{load_rules, AppConfig, CategoryRules};

use crate::report::{build_json_report, render_text_report};

#[derive(Debug, Parser)]
#[command(name = "linkpulse-cli")]
#[command(about = "Analyze LinkedIn post performance for a company page")]
struct Cli {
    /// Full organization URN (e.g. urn:li:organization:123456)
    #[arg(long)]
    organization_urn: Option<String>,

    /// Organization numeric ID (auto-converted to a URN)
    #[arg(long)]
    organization_id: Option<String>,

    /// Marketing API OAuth token; falls back to LINKEDIN_ACCESS_TOKEN
    #[arg(long)]
    access_token: Option<String>,

    /// Path to a file containing the access token
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Maximum number of posts to inspect
    #[arg(long, default_value_t = 300)]
    limit: usize,

    /// How many top-performing posts to highlight
    #[arg(long, default_value_t = 5)]
    top_n: usize,

    /// Lookback window in days
    #[arg(long, default_value_t = 365)]
    since_days: i64,

    /// Optional JSON file with a category -> keywords mapping
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Emit raw JSON instead of a human-readable report
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = linkpulse_core::load_app_config_from_env()?;
    init_tracing(cli.verbose, &config.log_level);

    let access_token = resolve_access_token(
        cli.access_token.as_deref(),
        cli.token_file.as_deref(),
        config.access_token.clone(),
    )?;
    let organization_urn = resolve_organization_urn(
        cli.organization_urn.as_deref(),
        cli.organization_id.as_deref(),
    )
    .ok_or_else(|| anyhow!("provide either --organization-urn or --organization-id"))?;

    let rules = resolve_rules(cli.rules.as_deref(), &config)?;

    let mut config = config;
    config.access_token = Some(access_token);
    let client = LinkedInClient::from_config(&config)?;

    tracing::info!(limit = cli.limit, organization = %organization_urn, "fetching posts");
    let posts = client
        .fetch_posts(&organization_urn, cli.limit, "PUBLISHED")
        .await?;
    tracing::info!(count = posts.len(), "hydrating engagement metrics");
    let posts = client.hydrate_engagement(posts).await?;

    let until = Utc::now();
    let since = until - Duration::days(cli.since_days);
    let analysis = analyze_posts(
        &posts,
        AnalyzeOptions {
            since: Some(since),
            until: Some(until),
            top_n: cli.top_n,
            rules,
        },
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&build_json_report(&analysis))?);
    } else {
        println!("{}", render_text_report(&analysis));
    }

    Ok(())
}

fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Token resolution order: `--access-token`, then `--token-file`, then the
/// environment (already folded into the app config).
fn resolve_access_token(
    cli_token: Option<&str>,
    token_file: Option<&Path>,
    env_token: Option<String>,
) -> anyhow::Result<String> {
    if let Some(token) = cli_token {
        return Ok(token.trim().to_string());
    }
    if let Some(path) = token_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read token file {}", path.display()))?;
        return Ok(content.trim().to_string());
    }
    env_token.ok_or_else(|| {
        anyhow!(
            "an access token is required (pass --access-token, --token-file, \
             or export LINKEDIN_ACCESS_TOKEN)"
        )
    })
}

/// Accepts a full URN as-is; a bare numeric ID gets the organization
/// prefix. Returns `None` when neither source is usable.
fn resolve_organization_urn(urn: Option<&str>, id: Option<&str>) -> Option<String> {
    if let Some(urn) = urn {
        let urn = urn.trim();
        if !urn.is_empty() {
            return Some(urn.to_string());
        }
    }
    let id = id?.trim();
    if id.is_empty() {
        return None;
    }
    if id.starts_with("urn:li:organization:") {
        Some(id.to_string())
    } else {
        Some(format!("urn:li:organization:{id}"))
    }
}

/// The `--rules` flag wins over `LINKPULSE_RULES_PATH`; with neither set
/// the analyzer falls back to the built-in rule set.
fn resolve_rules(
    cli_rules: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<Option<CategoryRules>> {
    let path = cli_rules.or(config.rules_path.as_deref());
    match path {
        Some(path) => {
            let rules = load_rules(path)
                .with_context(|| format!("failed to load category rules from {}", path.display()))?;
            Ok(Some(rules))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_args_are_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn full_urn_passes_through() {
        assert_eq!(
            resolve_organization_urn(Some(" urn:li:organization:42 "), None).as_deref(),
            Some("urn:li:organization:42")
        );
    }

    #[test]
    fn numeric_id_gets_the_urn_prefix() {
        assert_eq!(
            resolve_organization_urn(None, Some("123456")).as_deref(),
            Some("urn:li:organization:123456")
        );
    }

    #[test]
    fn id_that_is_already_a_urn_is_not_double_prefixed() {
        assert_eq!(
            resolve_organization_urn(None, Some("urn:li:organization:7")).as_deref(),
            Some("urn:li:organization:7")
        );
    }

    #[test]
    fn missing_both_sources_yields_none() {
        assert_eq!(resolve_organization_urn(None, None), None);
        assert_eq!(resolve_organization_urn(Some("  "), Some("")), None);
    }

    #[test]
    fn cli_token_wins_over_environment() {
        let token =
            resolve_access_token(Some(" cli-token "), None, Some("env-token".to_string()))
                .unwrap();
        assert_eq!(token, "cli-token");
    }

    #[test]
    fn env_token_is_the_last_resort() {
        let token = resolve_access_token(None, None, Some("env-token".to_string())).unwrap();
        assert_eq!(token, "env-token");
    }

    #[test]
    fn missing_token_is_a_descriptive_error() {
        let err = resolve_access_token(None, None, None).unwrap_err();
        assert!(err.to_string().contains("LINKEDIN_ACCESS_TOKEN"));
    }
}
