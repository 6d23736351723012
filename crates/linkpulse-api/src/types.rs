//! LinkedIn REST API response types.
//!
//! Post elements themselves stay as `serde_json::Value` — the two upstream
//! schema generations differ too much for one struct, and the normalizer
//! (see [`crate::normalize`]) handles both. Only the envelopes and the
//! `socialActions` summary are typed. Every field is `#[serde(default)]`:
//! the API omits empty sections rather than sending nulls.

use serde::Deserialize;

/// One page of the `/rest/posts` collection.
#[derive(Debug, Default, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl PostsPage {
    /// True when the paging block advertises a `rel="next"` link.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.paging.as_ref().is_some_and(|paging| {
            paging
                .links
                .iter()
                .any(|link| link.rel.as_deref() == Some("next"))
        })
    }
}

/// Pagination metadata attached to collection responses.
#[derive(Debug, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub links: Vec<PagingLink>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PagingLink {
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// The `socialActions/{urn}` summary payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialActions {
    #[serde(default)]
    pub reactions_summary: Option<AggregatedTotal>,
    #[serde(default)]
    pub likes_summary: Option<AggregatedTotal>,
    #[serde(default)]
    pub comments_summary: Option<CommentsSummary>,
    #[serde(default)]
    pub shares_summary: Option<SharesSummary>,
    #[serde(default)]
    pub clicks_summary: Option<ClicksSummary>,
    #[serde(default)]
    pub impressions_summary: Option<ImpressionsSummary>,
    #[serde(default)]
    pub video_analytics_summary: Option<VideoAnalyticsSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedTotal {
    #[serde(default)]
    pub aggregated_total: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsSummary {
    #[serde(default)]
    pub total_first_level_comments: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharesSummary {
    #[serde(default)]
    pub share_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClicksSummary {
    #[serde(default)]
    pub organic_clicks: Option<OrganicClicks>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganicClicks {
    #[serde(default)]
    pub clicks: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpressionsSummary {
    #[serde(default)]
    pub organic_impressions: Option<OrganicImpressions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganicImpressions {
    #[serde(default)]
    pub impressions_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAnalyticsSummary {
    #[serde(default)]
    pub view_counts: Option<ViewCounts>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCounts {
    #[serde(default)]
    pub at_least2_seconds_views: u64,
}
