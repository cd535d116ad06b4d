//! Typed wrappers over [`AuthenticatedClient`](crate::AuthenticatedClient),
//! one per area of the admin API.

mod analytics;
mod auth;
mod blogs;
mod comments;
mod likes;
mod profile;

pub use analytics::AnalyticsService;
pub use auth::{AuthService, OTP_LENGTH, OtpPurpose, OtpVerification};
pub use blogs::BlogService;
pub use comments::CommentService;
pub use likes::LikeService;
pub use profile::{ProfileAsset, ProfileService};
