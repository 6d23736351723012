//! Categorization and performance analysis for linkpulse.
//!
//! Takes the canonical posts produced by the API crate, assigns keyword
//! categories, filters to a time window, ranks by engagement, and
//! aggregates the traits shared by the top performers.

pub mod analyzer;
pub mod categorizer;

pub use analyzer::{
    analyze_posts, summarize_common_traits, AnalysisResult, AnalyzeOptions, TraitAverages,
    TraitSummary,
};
pub use categorizer::{
    build_category_matrix, category_counts, most_common, CategorizedPost, PostCategorizer,
    GENERAL_CATEGORY,
};
