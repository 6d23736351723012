//! Keyword-based classifier for high-level post themes.
//!
//! Matching is case-insensitive substring search over the post text and
//! its hashtags. Rules are scanned in declaration order and each rule
//! short-circuits on its first matching keyword — a post can still match
//! several rules. Posts matching nothing get the `general` label, so
//! categorization is total.

use std::collections::HashMap;

use serde::Serialize;

use linkpulse_core::{CategoryRules, Post};

/// Fallback label for posts matching no rule.
pub const GENERAL_CATEGORY: &str = "general";

/// A post paired with its non-empty category labels, in rule order.
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedPost {
    pub post: Post,
    pub categories: Vec<String>,
}

/// Assigns category labels to posts from an explicit rule set.
pub struct PostCategorizer {
    rules: CategoryRules,
    minimum_keyword_length: usize,
}

impl PostCategorizer {
    /// Creates a categorizer over the given rules. Keywords shorter than
    /// three characters are skipped as too unspecific to match on.
    #[must_use]
    pub fn new(rules: CategoryRules) -> Self {
        Self {
            rules,
            minimum_keyword_length: 3,
        }
    }

    /// Overrides the minimum keyword length threshold.
    #[must_use]
    pub fn with_minimum_keyword_length(mut self, minimum: usize) -> Self {
        self.minimum_keyword_length = minimum;
        self
    }

    /// Labels one post. The result always carries at least one category.
    #[must_use]
    pub fn categorize(&self, post: &Post) -> CategorizedPost {
        let text = post.text.to_lowercase();
        let mut categories = Vec::new();

        for rule in &self.rules.rules {
            for keyword in &rule.keywords {
                let cleaned = keyword.trim().to_lowercase();
                if cleaned.chars().count() < self.minimum_keyword_length {
                    continue;
                }
                if text.contains(&cleaned)
                    || post.hashtags.iter().any(|tag| tag.contains(&cleaned))
                {
                    categories.push(rule.name.clone());
                    break;
                }
            }
        }

        if categories.is_empty() {
            categories.push(GENERAL_CATEGORY.to_string());
        }

        CategorizedPost {
            post: post.clone(),
            categories,
        }
    }

    /// Labels a batch of posts, preserving order.
    #[must_use]
    pub fn categorize_many(&self, posts: &[Post]) -> Vec<CategorizedPost> {
        posts.iter().map(|post| self.categorize(post)).collect()
    }
}

/// Total label occurrences in first-occurrence order. One post can
/// contribute to several categories.
#[must_use]
pub fn category_counts(categorized: &[CategorizedPost]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for entry in categorized {
        for category in &entry.categories {
            match counts.iter_mut().find(|(name, _)| name == category) {
                Some((_, n)) => *n += 1,
                None => counts.push((category.clone(), 1)),
            }
        }
    }
    counts
}

/// Reorders counts descending by count. The sort is stable, so ties keep
/// their first-occurrence order.
#[must_use]
pub fn most_common(mut counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Inverse index from category label to the posts carrying it.
#[must_use]
pub fn build_category_matrix(categorized: &[CategorizedPost]) -> HashMap<String, Vec<Post>> {
    let mut matrix: HashMap<String, Vec<Post>> = HashMap::new();
    for entry in categorized {
        for category in &entry.categories {
            matrix
                .entry(category.clone())
                .or_default()
                .push(entry.post.clone());
        }
    }
    matrix
}
