//! Domain model types (pure).

pub mod api;
pub mod error;
pub mod identity;

// Re-export for convenience
pub use api::{parse_api_list, ApiData, ApiId, MissingApiId};
pub use error::{AppError, BackendError, DecodeError, SearchFailureKind, StoreError};
pub use identity::{Claims, Identity, DEFAULT_DISPLAY_NAME};
