//! Report rendering: human-readable text and a trimmed JSON projection.
//!
//! Display-only ratios (e.g. a category's share of analyzed posts) are
//! derived here, not in the analysis crate.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use linkpulse_analysis::{AnalysisResult, TraitSummary, GENERAL_CATEGORY};

/// Renders the full text report.
#[must_use]
pub fn render_text_report(result: &AnalysisResult) -> String {
    let category_lookup: HashMap<&str, &[String]> = result
        .categorized_posts
        .iter()
        .map(|entry| (entry.post.id.as_str(), entry.categories.as_slice()))
        .collect();

    let mut lines = vec![
        format!(
            "Analyzed {} posts out of {} fetched.",
            result.total_posts_analyzed, result.total_posts_fetched
        ),
        format!(
            "Timeframe: {} -> {}",
            result.since.date_naive(),
            result.until.date_naive()
        ),
        String::new(),
        "Top categories (share of analyzed posts):".to_string(),
    ];

    for (category, count) in result.top_categories.iter().take(5) {
        #[allow(clippy::cast_precision_loss)]
        let share = *count as f64 / result.total_posts_analyzed.max(1) as f64;
        lines.push(format!(
            "  - {category}: {:.0}% of posts",
            share * 100.0
        ));
    }

    lines.push(String::new());
    lines.push("Most successful posts (ranked by engagement rate):".to_string());
    for (idx, post) in result.top_posts.iter().enumerate() {
        let categories = category_lookup
            .get(post.id.as_str())
            .map_or_else(|| GENERAL_CATEGORY.to_string(), |c| c.join(", "));
        let date = post.created_at.map_or_else(
            || "unknown date".to_string(),
            |dt| dt.date_naive().to_string(),
        );
        lines.push(format!(
            "{}. {date} | Engagement {:.2}% | {} interactions | {categories}",
            idx + 1,
            post.stats.engagement_rate(),
            post.stats.total_interactions()
        ));
        if let Some(permalink) = post.permalink() {
            lines.push(format!("   {permalink}"));
        }
    }

    lines.push(String::new());
    lines.push("Traits shared by top posts:".to_string());
    match &result.trait_summary {
        None => lines.push("  (Insufficient data to derive traits.)".to_string()),
        Some(summary) => render_traits(&mut lines, summary),
    }

    lines.join("\n")
}

fn render_traits(lines: &mut Vec<String>, summary: &TraitSummary) {
    push_share_section(lines, "categories", &summary.categories);
    push_share_section(lines, "media_types", &summary.media_types);
    push_share_section(lines, "days", &summary.days);

    lines.push("  hashtags:".to_string());
    for (tag, count) in &summary.hashtags {
        lines.push(format!("    - {tag}: {count}"));
    }

    lines.push("  averages:".to_string());
    lines.push(format!("    - word_count: {}", summary.averages.word_count));
    lines.push(format!(
        "    - hashtags_per_post: {}",
        summary.averages.hashtags_per_post
    ));
    lines.push(format!(
        "    - link_rate: {:.0}%",
        summary.averages.link_rate * 100.0
    ));
    lines.push(format!(
        "    - mention_rate: {:.0}%",
        summary.averages.mention_rate * 100.0
    ));
}

fn push_share_section(lines: &mut Vec<String>, title: &str, entries: &[(String, f64)]) {
    lines.push(format!("  {title}:"));
    for (name, share) in entries {
        lines.push(format!("    - {name}: {:.0}%", share * 100.0));
    }
}

/// JSON projection of an [`AnalysisResult`] with a trimmed per-post view.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub total_posts_fetched: usize,
    pub total_posts_analyzed: usize,
    pub top_categories: &'a [(String, u64)],
    pub trait_summary: Option<&'a TraitSummary>,
    pub top_posts: Vec<PostReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PostReport<'a> {
    pub id: &'a str,
    pub created_at: Option<DateTime<Utc>>,
    pub engagement_rate: f64,
    pub total_interactions: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub clicks: u64,
    pub impressions: u64,
    pub media_type: Option<&'a str>,
    pub lifecycle_state: &'a str,
    pub permalink: Option<&'a str>,
}

/// Builds the JSON projection from an analysis result.
#[must_use]
pub fn build_json_report(result: &AnalysisResult) -> JsonReport<'_> {
    JsonReport {
        since: result.since,
        until: result.until,
        total_posts_fetched: result.total_posts_fetched,
        total_posts_analyzed: result.total_posts_analyzed,
        top_categories: &result.top_categories,
        trait_summary: result.trait_summary.as_ref(),
        top_posts: result
            .top_posts
            .iter()
            .map(|post| PostReport {
                id: &post.id,
                created_at: post.created_at,
                engagement_rate: post.stats.engagement_rate(),
                total_interactions: post.stats.total_interactions(),
                likes: post.stats.likes,
                comments: post.stats.comments,
                shares: post.stats.shares,
                clicks: post.stats.clicks,
                impressions: post.stats.impressions,
                media_type: post.media_type.as_deref(),
                lifecycle_state: &post.lifecycle_state,
                permalink: post.permalink(),
            })
            .collect(),
    }
}
