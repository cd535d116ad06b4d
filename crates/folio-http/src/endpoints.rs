//! Default endpoint paths and wire types of the admin API.
//!
//! Paths are relative to the configured base URL.

use serde::{Deserialize, Serialize};

// ============================================================================
// Auth
// ============================================================================

pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const SIGNUP_VERIFY_OTP: &str = "/admin/auth/signup/verify-otp";
pub const SIGNIN_VERIFY_OTP: &str = "/admin/auth/signin/verify-otp";
pub const PASSWORD_RESET_VERIFY_OTP: &str = "/admin/password/reset/verify";
pub const PASSWORD_UPDATE_VERIFY_OTP: &str = "/user/password/update/verify-otp";
pub const EMAIL_UPDATE_VERIFY_OTP: &str = "/user/email/verify-otp";
pub const AUTH_OTP_RESEND: &str = "/admin/auth/auth-otp/resend";
pub const OTP_RESEND: &str = "/auth/otp/resend";
pub const PASSWORD_RESET_REQUEST: &str = "/user/password/reset/request";
pub const LOGOUT: &str = "/admin-auth/signin/logout";

// ============================================================================
// Blogs
// ============================================================================

pub const BLOGS: &str = "/admin/blogs";
pub const BLOG_DRAFT: &str = "/admin/blogs/draft";
pub const BLOGS_PUBLISHED: &str = "/admin/blogs/read";
pub const BLOG_STATS: &str = "/admin/blogs/stats";
pub const BLOG_UPLOAD_IMAGE: &str = "/admin/blogs/upload-image";

pub fn blog(id: &str) -> String {
    format!("{}/{}", BLOGS, id)
}

pub fn blog_auto_save(id: &str) -> String {
    format!("{}/{}/auto-save", BLOGS, id)
}

pub fn blog_status(id: &str) -> String {
    format!("{}/{}/status", BLOGS, id)
}

pub fn blogs_by_status(status: &str) -> String {
    format!("{}/status/{}", BLOGS, status)
}

pub fn blog_by_slug(slug: &str) -> String {
    format!("{}/{}", BLOGS_PUBLISHED, slug)
}

pub fn blog_analytics(id: &str) -> String {
    format!("{}/analytics/{}", BLOGS, id)
}

// ============================================================================
// Comments and likes
// ============================================================================

pub const COMMENTS: &str = "/comments";
pub const LIKES_TOGGLE: &str = "/likes/toggle";

pub fn comment(id: &str) -> String {
    format!("{}/{}", COMMENTS, id)
}

pub fn blog_comments(blog_id: &str) -> String {
    format!("{}/blog/{}", COMMENTS, blog_id)
}

pub fn comment_like(id: &str) -> String {
    format!("{}/{}/like", COMMENTS, id)
}

pub fn comment_report(id: &str) -> String {
    format!("{}/{}/report", COMMENTS, id)
}

pub fn comment_replies(id: &str) -> String {
    format!("{}/{}/replies", COMMENTS, id)
}

pub fn likes(target_type: &str, target_id: &str) -> String {
    format!("/likes/{}/{}", target_type, target_id)
}

pub fn user_likes(user_id: &str) -> String {
    format!("/likes/user/{}", user_id)
}

// ============================================================================
// Profile
// ============================================================================

pub const PROFILE_QUOTE: &str = "/admin/profile/update/quote";
pub const PROFILE_HOBBIES: &str = "/admin/profile/update/hobbies";
pub const PROFILE_SOCIAL_MEDIA: &str = "/admin/profile/update/social-media";
pub const PROFILE_READING_RESOURCES: &str = "/admin/profile/update/reading-resources";
pub const PROFILE_BANNER: &str = "/admin/profile/banner";
pub const PROFILE_IMAGE: &str = "/admin/profile/image";
pub const PROFILE_RESUME: &str = "/admin/profile/resume";

// ============================================================================
// Wire types
// ============================================================================

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Token pair issued by the refresh and OTP endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Refresh responses arrive either enveloped or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RefreshResponse {
    Enveloped { data: TokenPair },
    Bare(TokenPair),
}

impl RefreshResponse {
    pub fn into_tokens(self) -> TokenPair {
        match self {
            RefreshResponse::Enveloped { data } => data,
            RefreshResponse::Bare(tokens) => tokens,
        }
    }
}
