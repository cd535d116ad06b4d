//! folio-core - Core types and traits for the folio admin API client.

pub mod blog;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod profile;
pub mod request;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;
pub mod upload;

pub use credentials::Credentials;
pub use envelope::Envelope;
pub use error::{ApiError, NormalizedError, TransportError};
pub use request::{ApiRequest, ApiResponse, Method};
pub use session::SessionState;
pub use store::{MemoryStore, StorageKey};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{CredentialStore, Transport};
pub use types::ApiUrl;
pub use upload::{FileUpload, UploadKind};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, ApiError>;
