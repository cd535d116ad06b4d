//! Core value types.
//!
//! These types enforce their invariants at construction time.

mod api_url;

pub use api_url::{ApiUrl, DEFAULT_API_URL};
