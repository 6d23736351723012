//! Normalization of raw post payloads into the canonical [`Post`] record.
//!
//! The posts API has two schema generations in the wild: the current
//! `/rest/posts` shape and the legacy `/ugcPosts` shape. Each extractor
//! below tries the current shape first and falls back to the named legacy
//! alternative. Nothing in this module fails — a missing or mistyped
//! nested field degrades to empty/absent, never to an error.

use chrono::{DateTime, Utc};
use serde_json::Value;

use linkpulse_core::{InteractionStats, Post};

use crate::types::SocialActions;

const LEGACY_SHARE_CONTENT: &str = "com.linkedin.ugc.ShareContent";
const LEGACY_VISIBILITY: &str = "com.linkedin.ugc.MemberNetworkVisibility";

/// Builds a [`Post`] from one element of a posts collection response.
///
/// Stats are left zero-valued; engagement hydration attaches them in a
/// separate pass. The original payload is retained on the record for
/// fields not modeled explicitly.
#[must_use]
pub fn normalize_post(payload: &Value) -> Post {
    let id = string_field(payload, "id")
        .or_else(|| string_field(payload, "urn"))
        .unwrap_or_default();

    Post {
        id,
        author: string_field(payload, "author").unwrap_or_default(),
        text: extract_text(payload),
        created_at: extract_created_at(payload),
        lifecycle_state: string_field(payload, "lifecycleState").unwrap_or_default(),
        media_type: extract_media_type(payload),
        visibility: extract_visibility(payload),
        hashtags: extract_hashtags(payload),
        stats: InteractionStats::default(),
        raw: payload.clone(),
    }
}

/// Maps a `socialActions` summary onto [`InteractionStats`].
///
/// Likes fall back to the aggregated reactions total when the dedicated
/// likes summary is absent — newer accounts only report reactions.
#[must_use]
pub fn parse_interaction_stats(summary: &SocialActions) -> InteractionStats {
    let reactions = summary
        .reactions_summary
        .as_ref()
        .map_or(0, |s| s.aggregated_total);
    let likes = summary
        .likes_summary
        .as_ref()
        .map_or(reactions, |s| s.aggregated_total);

    InteractionStats {
        likes,
        comments: summary
            .comments_summary
            .as_ref()
            .map_or(0, |s| s.total_first_level_comments),
        shares: summary
            .shares_summary
            .as_ref()
            .map_or(0, |s| s.share_count),
        clicks: summary
            .clicks_summary
            .as_ref()
            .and_then(|s| s.organic_clicks.as_ref())
            .map_or(0, |c| c.clicks),
        impressions: summary
            .impressions_summary
            .as_ref()
            .and_then(|s| s.organic_impressions.as_ref())
            .map_or(0, |i| i.impressions_count),
        video_views: summary
            .video_analytics_summary
            .as_ref()
            .and_then(|s| s.view_counts.as_ref())
            .map_or(0, |v| v.at_least2_seconds_views),
    }
}

/// Best-effort extraction of the text body, trying each schema in turn.
pub(crate) fn extract_text(payload: &Value) -> String {
    text_from_rest_post(payload)
        .or_else(|| text_from_legacy_share(payload))
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Current `/rest/posts` shape: `text.text`.
fn text_from_rest_post(payload: &Value) -> Option<&str> {
    payload.get("text")?.get("text")?.as_str()
}

/// Legacy `/ugcPosts` shape: `specificContent -> ShareContent ->
/// shareCommentary -> text`.
fn text_from_legacy_share(payload: &Value) -> Option<&str> {
    payload
        .get("specificContent")?
        .get(LEGACY_SHARE_CONTENT)?
        .get("shareCommentary")?
        .get("text")?
        .as_str()
}

/// Collects hashtags from both known sources, in order and without
/// deduplication: first the top-level `content.hashtags` list, then
/// legacy media thumbnails carrying an
/// `imageSpecificContent.shareHashtag`. Tags are lowercased and lose
/// their leading `#`.
pub(crate) fn extract_hashtags(payload: &Value) -> Vec<String> {
    let mut hashtags = Vec::new();

    if let Some(items) = payload
        .get("content")
        .and_then(|c| c.get("hashtags"))
        .and_then(Value::as_array)
    {
        for item in items {
            if let Some(tag) = item.as_str() {
                hashtags.push(clean_hashtag(tag));
            }
        }
    }

    if let Some(media) = payload
        .get("specificContent")
        .and_then(|c| c.get(LEGACY_SHARE_CONTENT))
        .and_then(|c| c.get("media"))
        .and_then(Value::as_array)
    {
        for entity in media {
            let Some(thumbnails) = entity.get("thumbnails").and_then(Value::as_array) else {
                continue;
            };
            for thumbnail in thumbnails {
                if let Some(tag) = thumbnail
                    .get("imageSpecificContent")
                    .and_then(|c| c.get("shareHashtag"))
                    .and_then(Value::as_str)
                {
                    hashtags.push(clean_hashtag(tag));
                }
            }
        }
    }

    hashtags
}

fn clean_hashtag(tag: &str) -> String {
    tag.strip_prefix('#').unwrap_or(tag).to_lowercase()
}

/// First media entry's `mediaType`, if any.
fn extract_media_type(payload: &Value) -> Option<String> {
    payload
        .get("content")?
        .get("media")?
        .as_array()?
        .first()?
        .get("mediaType")?
        .as_str()
        .map(ToString::to_string)
}

/// `createdAt.time` millisecond epoch converted to UTC. A missing or
/// out-of-range timestamp is reported as unknown, not defaulted to now.
fn extract_created_at(payload: &Value) -> Option<DateTime<Utc>> {
    let millis = payload.get("createdAt")?.get("time")?.as_i64()?;
    DateTime::from_timestamp_millis(millis)
}

fn extract_visibility(payload: &Value) -> Option<String> {
    payload
        .get("visibility")?
        .get(LEGACY_VISIBILITY)?
        .as_str()
        .map(ToString::to_string)
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_prefers_rest_post_shape() {
        let payload = json!({
            "text": { "text": "  current shape  " },
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": "legacy shape" }
                }
            }
        });
        assert_eq!(extract_text(&payload), "current shape");
    }

    #[test]
    fn text_falls_back_to_legacy_share_commentary() {
        let payload = json!({
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": " from the old api " }
                }
            }
        });
        assert_eq!(extract_text(&payload), "from the old api");
    }

    #[test]
    fn text_defaults_to_empty_on_malformed_shapes() {
        assert_eq!(extract_text(&json!({})), "");
        // `text` present but a plain string, not the expected object.
        assert_eq!(extract_text(&json!({ "text": "flat" })), "");
    }

    #[test]
    fn hashtags_concatenate_both_sources_without_dedup() {
        let payload = json!({
            "content": { "hashtags": ["#AI"] },
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "media": [
                        {
                            "thumbnails": [
                                { "imageSpecificContent": { "shareHashtag": "#Launch" } },
                                { "imageSpecificContent": { "shareHashtag": "#ai" } }
                            ]
                        },
                        { "thumbnails": [] }
                    ]
                }
            }
        });
        assert_eq!(extract_hashtags(&payload), ["ai", "launch", "ai"]);
    }

    #[test]
    fn hashtags_skip_non_string_entries() {
        let payload = json!({ "content": { "hashtags": ["#One", 42, null, "two"] } });
        assert_eq!(extract_hashtags(&payload), ["one", "two"]);
    }

    #[test]
    fn media_type_reads_first_media_entry() {
        let payload = json!({
            "content": { "media": [ { "mediaType": "VIDEO" }, { "mediaType": "IMAGE" } ] }
        });
        let post = normalize_post(&payload);
        assert_eq!(post.media_type.as_deref(), Some("VIDEO"));
    }

    #[test]
    fn created_at_converts_epoch_millis_to_utc() {
        let payload = json!({ "createdAt": { "time": 1_704_067_200_000_i64 } });
        let post = normalize_post(&payload);
        let dt = post.created_at.expect("timestamp should parse");
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn missing_created_at_stays_unknown() {
        let post = normalize_post(&json!({ "id": "urn:li:share:1" }));
        assert!(post.created_at.is_none());
        assert!(post.created_day().is_none());
    }

    #[test]
    fn id_falls_back_to_urn() {
        let post = normalize_post(&json!({ "urn": "urn:li:ugcPost:9" }));
        assert_eq!(post.id, "urn:li:ugcPost:9");

        // An empty `id` is treated as absent, like the urn fallback expects.
        let post = normalize_post(&json!({ "id": "", "urn": "urn:li:ugcPost:10" }));
        assert_eq!(post.id, "urn:li:ugcPost:10");
    }

    #[test]
    fn fully_empty_payload_normalizes_without_error() {
        let post = normalize_post(&json!({}));
        assert_eq!(post.id, "");
        assert_eq!(post.text, "");
        assert!(post.hashtags.is_empty());
        assert!(post.media_type.is_none());
        assert!(post.visibility.is_none());
        assert_eq!(post.stats, InteractionStats::default());
    }

    #[test]
    fn visibility_reads_member_network_field() {
        let payload = json!({
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" }
        });
        let post = normalize_post(&payload);
        assert_eq!(post.visibility.as_deref(), Some("PUBLIC"));
    }

    #[test]
    fn stats_parse_maps_all_counters() {
        let summary: SocialActions = serde_json::from_value(json!({
            "likesSummary": { "aggregatedTotal": 10 },
            "commentsSummary": { "totalFirstLevelComments": 4 },
            "sharesSummary": { "shareCount": 3 },
            "clicksSummary": { "organicClicks": { "clicks": 2 } },
            "impressionsSummary": { "organicImpressions": { "impressionsCount": 900 } },
            "videoAnalyticsSummary": { "viewCounts": { "atLeast2SecondsViews": 55 } }
        }))
        .unwrap();
        let stats = parse_interaction_stats(&summary);
        assert_eq!(stats.likes, 10);
        assert_eq!(stats.comments, 4);
        assert_eq!(stats.shares, 3);
        assert_eq!(stats.clicks, 2);
        assert_eq!(stats.impressions, 900);
        assert_eq!(stats.video_views, 55);
        assert_eq!(stats.total_interactions(), 19);
    }

    #[test]
    fn likes_fall_back_to_reactions_total() {
        let summary: SocialActions = serde_json::from_value(json!({
            "reactionsSummary": { "aggregatedTotal": 21 }
        }))
        .unwrap();
        let stats = parse_interaction_stats(&summary);
        assert_eq!(stats.likes, 21);
    }

    #[test]
    fn empty_summary_yields_zeroed_stats() {
        let stats = parse_interaction_stats(&SocialActions::default());
        assert_eq!(stats, InteractionStats::default());
    }
}
