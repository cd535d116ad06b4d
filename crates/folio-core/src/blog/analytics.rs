//! Dashboard and per-post analytics types.

use serde::{Deserialize, Serialize};

use super::Blog;

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsOverview {
    pub total_blogs: u64,
    pub published_blogs: u64,
    pub draft_blogs: u64,
    pub scheduled_blogs: u64,
    pub total_views: u64,
    pub total_words: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub total_shares: u64,
    pub total_readers: u64,
}

/// Dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: StatsOverview,
    #[serde(default)]
    pub trending: Vec<Blog>,
}

/// Share counts for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStat {
    #[serde(rename = "_id")]
    pub platform: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_clicks: u64,
}

/// Engagement figures for one post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementSummary {
    pub engagement_rate: String,
    pub total_engagements: u64,
    pub platform_stats: Vec<PlatformStat>,
}

/// Raw engagement records, kept schema-agnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementBreakdown {
    pub likes: Vec<serde_json::Value>,
    pub comments: Vec<serde_json::Value>,
    pub shares: Vec<serde_json::Value>,
}

/// Per-post analytics payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogAnalytics {
    pub blog: Blog,
    #[serde(default)]
    pub analytics: EngagementSummary,
    #[serde(default)]
    pub breakdown: EngagementBreakdown,
}
