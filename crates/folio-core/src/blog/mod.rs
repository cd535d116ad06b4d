//! Blog content and analytics types.
//!
//! The operations on these types live in the service layer of `folio-http`.

mod analytics;
mod types;

pub use analytics::{
    BlogAnalytics, DashboardStats, EngagementBreakdown, EngagementSummary, PlatformStat,
    StatsOverview,
};
pub use types::{
    Blog, BlogDraft, BlogImage, BlogStatus, CodeBlock, Comment, CoverImage, LikeTarget,
    PublishedQuery,
};
