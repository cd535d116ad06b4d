//! Output formatting helpers.
//!
//! Human-readable lines go to stdout; progress notes go to stderr.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use folio_core::blog::{Blog, BlogStatus};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print the server's confirmation, or `fallback` when it sent none.
pub fn confirmation(message: Option<String>, fallback: &str) {
    success(message.as_deref().unwrap_or(fallback));
}

/// Print a progress note on stderr.
pub fn progress(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print one post as a single summary row.
pub fn blog_row(blog: &Blog) {
    let status = match blog.status {
        BlogStatus::Published => blog.status.as_str().green(),
        BlogStatus::Scheduled => blog.status.as_str().cyan(),
        BlogStatus::Draft => blog.status.as_str().yellow(),
        BlogStatus::Archived => blog.status.as_str().dimmed(),
    };
    println!(
        "{}  {:<10} {}  {}",
        blog.id.dimmed(),
        status,
        blog.title,
        format!("({} views)", blog.views).dimmed()
    );
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
