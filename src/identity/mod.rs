//! Identity resolution.
//!
//! Reads the stored credential once and turns it into the display identity.
//! Resolution never fails: every problem degrades to [`Identity::anonymous`].

pub mod jwt;
pub mod store;

pub use jwt::{JwtDecoder, TokenDecoder};
pub use store::{CredentialStore, FileCredentialStore, StaticCredentialStore};

use crate::model::Identity;

/// Resolves the page identity from an injected store and decoder.
#[derive(Debug, Clone)]
pub struct IdentityResolver<S, D> {
    store: S,
    decoder: D,
}

impl<S: CredentialStore, D: TokenDecoder> IdentityResolver<S, D> {
    /// Resolver reading from `store` and decoding with `decoder`.
    pub fn new(store: S, decoder: D) -> Self {
        Self { store, decoder }
    }

    /// Resolve the identity.
    ///
    /// - no credential: anonymous identity, nothing logged
    /// - decodable credential: claims adopted (name only when non-empty)
    /// - malformed or expired credential: anonymous identity, warning logged
    pub fn resolve(&self) -> Identity {
        let Some(credential) = self.store.credential() else {
            tracing::debug!("No stored credential, using anonymous identity");
            return Identity::anonymous();
        };

        match self.decoder.decode(&credential) {
            Ok(claims) => {
                let identity = Identity::from_claims(claims);
                tracing::info!(
                    user_id = identity.id(),
                    role = identity.role(),
                    "Resolved identity from credential"
                );
                identity
            }
            Err(err) => {
                tracing::warn!(error = %err, "Error decoding user token, using anonymous identity");
                Identity::anonymous()
            }
        }
    }

    /// The injected credential store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
