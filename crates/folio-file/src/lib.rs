//! folio-file - File-backed credential store for folio.
//!
//! [`FileStore`] keeps the session keys in one JSON object on disk so a
//! session survives process restarts, the way a browser's local storage
//! survives page reloads.

mod store;

pub use store::{FileStore, LOCK_SUFFIX};
