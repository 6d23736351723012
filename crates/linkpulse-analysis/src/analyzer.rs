//! Time-window filtering, engagement ranking, and trait aggregation.
//!
//! [`analyze_posts`] is the single entry point: filter to the window,
//! categorize the full filtered set, rank by engagement, and summarize
//! the traits of the top performers. The categorizer runs twice by
//! design — once over the whole filtered set for the category counts and
//! once over the top posts for the trait summary.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use linkpulse_core::{CategoryRules, Post};

use crate::categorizer::{category_counts, most_common, CategorizedPost, PostCategorizer};

/// Options for [`analyze_posts`]. `since`/`until` default to the last
/// 365 days; `rules` defaults to the built-in category set.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub top_n: usize,
    pub rules: Option<CategoryRules>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            since: None,
            until: None,
            top_n: 5,
            rules: None,
        }
    }
}

/// Immutable snapshot of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub total_posts_fetched: usize,
    pub total_posts_analyzed: usize,
    pub categorized_posts: Vec<CategorizedPost>,
    pub top_posts: Vec<Post>,
    /// Category label counts over the full filtered set, descending by
    /// count; ties keep first-occurrence order.
    pub top_categories: Vec<(String, u64)>,
    /// Aggregated characteristics of `top_posts` only. `None` when there
    /// are no top posts to summarize.
    pub trait_summary: Option<TraitSummary>,
}

/// Aggregated descriptive statistics over a post subset.
#[derive(Debug, Clone, Serialize)]
pub struct TraitSummary {
    /// Category share of the subset, descending by count, 2 decimals.
    pub categories: Vec<(String, f64)>,
    /// Media-type share; a missing media type buckets as `"unspecified"`.
    pub media_types: Vec<(String, f64)>,
    /// Posting-weekday share, descending by count.
    pub days: Vec<(String, f64)>,
    /// Top five hashtags with raw occurrence counts.
    pub hashtags: Vec<(String, u64)>,
    pub averages: TraitAverages,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraitAverages {
    /// Mean word count, 1 decimal.
    pub word_count: f64,
    /// Mean hashtag count per post, 2 decimals.
    pub hashtags_per_post: f64,
    /// Fraction of posts containing a link, 2 decimals.
    pub link_rate: f64,
    /// Fraction of posts containing a mention, 2 decimals.
    pub mention_rate: f64,
}

/// Filter and summarize post performance.
///
/// Posts with an unknown creation time never enter the window. Ranking is
/// a stable descending sort on `(engagement_rate, total_interactions)`,
/// so ties keep their input order.
#[must_use]
pub fn analyze_posts(posts: &[Post], options: AnalyzeOptions) -> AnalysisResult {
    let until = options.until.unwrap_or_else(Utc::now);
    let since = options
        .since
        .unwrap_or_else(|| Utc::now() - Duration::days(365));

    let filtered: Vec<Post> = posts
        .iter()
        .filter(|post| {
            post.created_at
                .is_some_and(|created| since <= created && created <= until)
        })
        .cloned()
        .collect();

    tracing::debug!(
        fetched = posts.len(),
        analyzed = filtered.len(),
        "filtered posts to analysis window"
    );

    let categorizer = PostCategorizer::new(options.rules.unwrap_or_default());
    let categorized = categorizer.categorize_many(&filtered);
    let top_categories = most_common(category_counts(&categorized));

    let mut ranked = filtered.clone();
    ranked.sort_by(|a, b| {
        b.stats
            .engagement_rate()
            .total_cmp(&a.stats.engagement_rate())
            .then_with(|| b.stats.total_interactions().cmp(&a.stats.total_interactions()))
    });
    ranked.truncate(options.top_n);

    let trait_summary = summarize_common_traits(&ranked, &categorizer);

    AnalysisResult {
        since,
        until,
        total_posts_fetched: posts.len(),
        total_posts_analyzed: filtered.len(),
        categorized_posts: categorized,
        top_posts: ranked,
        top_categories,
        trait_summary,
    }
}

/// Aggregated characteristics for the supplied posts, or `None` for an
/// empty input — the short-circuit happens before any division.
#[must_use]
pub fn summarize_common_traits(
    posts: &[Post],
    categorizer: &PostCategorizer,
) -> Option<TraitSummary> {
    if posts.is_empty() {
        return None;
    }

    let total = posts.len();
    let categorized = categorizer.categorize_many(posts);
    let categories = normalize_counts(&most_common(category_counts(&categorized)), total);

    let mut media_counter: Vec<(String, u64)> = Vec::new();
    let mut day_counter: Vec<(String, u64)> = Vec::new();
    let mut hashtag_counter: Vec<(String, u64)> = Vec::new();
    for post in posts {
        let media = post
            .media_type
            .clone()
            .unwrap_or_else(|| "unspecified".to_string());
        bump(&mut media_counter, media);
        if let Some(day) = post.created_day() {
            bump(&mut day_counter, day);
        }
        for tag in &post.hashtags {
            bump(&mut hashtag_counter, tag.clone());
        }
    }

    let mut hashtags = most_common(hashtag_counter);
    hashtags.truncate(5);

    #[allow(clippy::cast_precision_loss)]
    let denom = total as f64;
    #[allow(clippy::cast_precision_loss)]
    let avg_word_count = posts.iter().map(Post::word_count).sum::<usize>() as f64 / denom;
    #[allow(clippy::cast_precision_loss)]
    let avg_hashtags = posts.iter().map(|p| p.hashtags.len()).sum::<usize>() as f64 / denom;
    #[allow(clippy::cast_precision_loss)]
    let link_rate = posts.iter().filter(|p| p.contains_link()).count() as f64 / denom;
    #[allow(clippy::cast_precision_loss)]
    let mention_rate = posts.iter().filter(|p| p.contains_mention()).count() as f64 / denom;

    Some(TraitSummary {
        categories,
        media_types: normalize_counts(&media_counter, total),
        days: normalize_counts(&most_common(day_counter), total),
        hashtags,
        averages: TraitAverages {
            word_count: round_to(avg_word_count, 1),
            hashtags_per_post: round_to(avg_hashtags, 2),
            link_rate: round_to(link_rate, 2),
            mention_rate: round_to(mention_rate, 2),
        },
    })
}

fn bump(counts: &mut Vec<(String, u64)>, key: String) {
    match counts.iter_mut().find(|(name, _)| *name == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}

/// Converts counts to shares of `total`, rounded to 2 decimals. An empty
/// total yields an empty list rather than dividing by zero.
fn normalize_counts(counts: &[(String, u64)], total: usize) -> Vec<(String, f64)> {
    if total == 0 {
        return Vec::new();
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = total as f64;
    counts
        .iter()
        .map(|(name, count)| {
            #[allow(clippy::cast_precision_loss)]
            let share = *count as f64 / denom;
            (name.clone(), round_to(share, 2))
        })
        .collect()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
