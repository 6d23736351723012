//! The canonical post record and its engagement counters.
//!
//! A [`Post`] is built once by the payload normalizer with zero-valued
//! [`InteractionStats`], then replaced wholesale via [`Post::with_stats`]
//! during engagement hydration. Everything downstream treats the record as
//! read-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized engagement metrics for a single post.
///
/// `impressions` and `video_views` are reach metrics and are deliberately
/// excluded from [`InteractionStats::total_interactions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionStats {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub video_views: u64,
}

impl InteractionStats {
    /// Sum of likes, comments, shares, and clicks.
    #[must_use]
    pub fn total_interactions(&self) -> u64 {
        self.likes + self.comments + self.shares + self.clicks
    }

    /// Total interactions as a percentage of impressions, rounded to three
    /// decimals. Returns `0.0` when there are no impressions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_rate(&self) -> f64 {
        if self.impressions == 0 {
            return 0.0;
        }
        let rate = self.total_interactions() as f64 / self.impressions as f64 * 100.0;
        (rate * 1000.0).round() / 1000.0
    }
}

/// Structured representation of one organization post.
///
/// `created_at` is `None` when the upstream payload carried no creation
/// timestamp; such posts are excluded from time-window filtering rather
/// than silently dated "now". `raw` retains the original payload for
/// fields not modeled explicitly (e.g. the permalink).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub lifecycle_state: String,
    pub media_type: Option<String>,
    pub visibility: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub stats: InteractionStats,
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl Post {
    /// Returns a new record carrying the given stats, leaving every other
    /// field untouched. Hydration replaces posts instead of mutating them.
    #[must_use]
    pub fn with_stats(mut self, stats: InteractionStats) -> Self {
        self.stats = stats;
        self
    }

    /// Permalink from the retained raw payload, if the upstream set one.
    #[must_use]
    pub fn permalink(&self) -> Option<&str> {
        self.raw.get("permalink").and_then(serde_json::Value::as_str)
    }

    /// Number of whitespace-separated tokens in the post text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Whether the text mentions another account.
    #[must_use]
    pub fn contains_mention(&self) -> bool {
        self.text.contains('@')
    }

    /// Whether the text carries an outbound link.
    #[must_use]
    pub fn contains_link(&self) -> bool {
        self.text.contains("http://") || self.text.contains("https://")
    }

    /// Weekday name of the creation time in UTC (e.g. `"Tuesday"`), or
    /// `None` when the creation time is unknown.
    #[must_use]
    pub fn created_day(&self) -> Option<String> {
        self.created_at.map(|dt| dt.format("%A").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post_with_text(text: &str) -> Post {
        Post {
            id: "urn:li:share:1".to_string(),
            author: "urn:li:organization:1".to_string(),
            text: text.to_string(),
            created_at: None,
            lifecycle_state: "PUBLISHED".to_string(),
            media_type: None,
            visibility: None,
            hashtags: Vec::new(),
            stats: InteractionStats::default(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn total_interactions_excludes_impressions_and_video_views() {
        let stats = InteractionStats {
            likes: 10,
            comments: 5,
            shares: 3,
            clicks: 2,
            impressions: 1_000,
            video_views: 500,
        };
        assert_eq!(stats.total_interactions(), 20);
    }

    #[test]
    fn engagement_rate_is_zero_without_impressions() {
        let stats = InteractionStats {
            likes: 50,
            ..InteractionStats::default()
        };
        assert_eq!(stats.engagement_rate(), 0.0);
    }

    #[test]
    fn engagement_rate_is_a_percentage_rounded_to_three_decimals() {
        let stats = InteractionStats {
            likes: 1,
            comments: 1,
            shares: 1,
            clicks: 0,
            impressions: 700,
            video_views: 0,
        };
        // 3 / 700 * 100 = 0.42857... -> 0.429
        assert_eq!(stats.engagement_rate(), 0.429);
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        let post = post_with_text("  hello   brave\nnew world ");
        assert_eq!(post.word_count(), 4);
    }

    #[test]
    fn contains_mention_detects_at_sign() {
        assert!(post_with_text("thanks @acme for hosting").contains_mention());
        assert!(!post_with_text("no mentions here").contains_mention());
    }

    #[test]
    fn contains_link_detects_both_schemes() {
        assert!(post_with_text("read more at https://example.com").contains_link());
        assert!(post_with_text("legacy http://example.com link").contains_link());
        assert!(!post_with_text("example.com without a scheme").contains_link());
    }

    #[test]
    fn created_day_is_weekday_name_in_utc() {
        let mut post = post_with_text("x");
        // 2024-01-01 was a Monday.
        post.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        assert_eq!(post.created_day().as_deref(), Some("Monday"));
    }

    #[test]
    fn created_day_is_none_for_unknown_timestamp() {
        assert_eq!(post_with_text("x").created_day(), None);
    }

    #[test]
    fn with_stats_returns_new_record() {
        let post = post_with_text("x");
        let hydrated = post.clone().with_stats(InteractionStats {
            likes: 7,
            ..InteractionStats::default()
        });
        assert_eq!(post.stats.likes, 0);
        assert_eq!(hydrated.stats.likes, 7);
        assert_eq!(hydrated.id, post.id);
    }

    #[test]
    fn permalink_reads_from_raw_payload() {
        let mut post = post_with_text("x");
        post.raw = serde_json::json!({ "permalink": "https://example.com/p/1" });
        assert_eq!(post.permalink(), Some("https://example.com/p/1"));

        post.raw = serde_json::json!({});
        assert_eq!(post.permalink(), None);
    }
}
