//! Persistent credential stores.
//!
//! The store is read once at controller initialization and never written.

use crate::model::StoreError;
use std::path::{Path, PathBuf};

/// Read-only access to the stored credential.
pub trait CredentialStore {
    /// Current credential, or `None` when nothing usable is stored.
    fn credential(&self) -> Option<String>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for &T {
    fn credential(&self) -> Option<String> {
        (**self).credential()
    }
}

/// Store backed by a file holding the raw token.
///
/// Surrounding whitespace is trimmed; an empty file counts as absent.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store backed by the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the credential is read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the credential file.
    ///
    /// A missing file is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file exists but cannot be read.
    pub fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(non_empty(contents)),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn credential(&self) -> Option<String> {
        match self.read() {
            Ok(credential) => credential,
            Err(err) => {
                tracing::warn!(error = %err, "Credential store unreadable, continuing anonymously");
                None
            }
        }
    }
}

/// In-memory store, used for injected tokens and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    credential: Option<String>,
}

impl StaticCredentialStore {
    /// Store holding `credential`; blank strings count as absent.
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: credential.and_then(non_empty),
        }
    }

    /// Store without a credential.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::new(Some(token.into()))
    }
}

impl CredentialStore for StaticCredentialStore {
    fn credential(&self) -> Option<String> {
        self.credential.clone()
    }
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
