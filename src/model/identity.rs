//! Signed-in user identity.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Display name used when no usable credential is available.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Claims carried by a decoded credential.
///
/// Every field is optional and loosely typed: a claim of an unexpected type
/// is dropped rather than failing the whole payload. [`Identity::from_claims`]
/// decides what is usable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    /// User id. Numeric ids are kept in their decimal form.
    #[serde(default, deserialize_with = "loose_string")]
    pub id: Option<String>,
    /// Role name, e.g. `user` or `provider`.
    #[serde(default, deserialize_with = "loose_string")]
    pub role: Option<String>,
    /// Display name.
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default, deserialize_with = "loose_number")]
    pub exp: Option<f64>,
}

/// Strings as-is, numbers in decimal form, anything else dropped.
fn loose_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => Some(raw),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Numbers only; anything else dropped.
fn loose_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// Identity shown on the page. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: Option<String>,
    role: Option<String>,
    display_name: String,
}

impl Identity {
    /// Identity used for anonymous or undecodable sessions.
    pub fn anonymous() -> Self {
        Self {
            id: None,
            role: None,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
        }
    }

    /// Build an identity from decoded claims.
    ///
    /// The `name` claim is adopted only when non-empty; otherwise the
    /// default display name is kept.
    pub fn from_claims(claims: Claims) -> Self {
        let display_name = claims
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());

        Self {
            id: claims.id,
            role: claims.role,
            display_name,
        }
    }

    /// User id claim, absent for the anonymous identity.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Role claim, absent for the anonymous identity.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Name for the greeting; [`DEFAULT_DISPLAY_NAME`] unless a non-empty
    /// `name` claim was present.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}
