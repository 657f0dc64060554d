//! JWT payload decoding.
//!
//! The signature is not verified: the page only needs the claims for
//! display, and the backend re-validates the token on every request.

use crate::model::{Claims, DecodeError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};

/// Turns an opaque credential string into claims.
pub trait TokenDecoder {
    /// # Errors
    ///
    /// Returns `DecodeError` when the credential is malformed or expired.
    fn decode(&self, credential: &str) -> Result<Claims, DecodeError>;
}

impl<T: TokenDecoder + ?Sized> TokenDecoder for &T {
    fn decode(&self, credential: &str) -> Result<Claims, DecodeError> {
        (**self).decode(credential)
    }
}

/// Decoder for `header.payload.signature` tokens.
#[derive(Debug, Clone, Default)]
pub struct JwtDecoder {
    /// Fixed evaluation time for expiry checks; `None` means "now".
    at: Option<DateTime<Utc>>,
}

impl JwtDecoder {
    /// Decoder that evaluates `exp` against the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder that evaluates `exp` against a fixed instant.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { at: Some(instant) }
    }

    fn now(&self) -> DateTime<Utc> {
        self.at.unwrap_or_else(Utc::now)
    }
}

impl TokenDecoder for JwtDecoder {
    fn decode(&self, credential: &str) -> Result<Claims, DecodeError> {
        let payload = credential
            .split('.')
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or(DecodeError::MissingPayload)?;

        // Some issuers keep base64 padding on the payload segment.
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| DecodeError::Base64(e.to_string()))?;

        let claims: Claims =
            serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(e.to_string()))?;

        if let Some(exp) = claims.exp {
            if exp <= self.now().timestamp() as f64 {
                return Err(DecodeError::Expired { exp: exp as i64 });
            }
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    fn fixed_decoder() -> JwtDecoder {
        JwtDecoder::at(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn decodes_claims_from_payload_segment() {
        let token = token_with_payload(&json!({"id": "u-1", "role": "user", "name": "Harsh"}));

        let claims = fixed_decoder().decode(&token).expect("valid token");

        assert_eq!(claims.id.as_deref(), Some("u-1"));
        assert_eq!(claims.role.as_deref(), Some("user"));
        assert_eq!(claims.name.as_deref(), Some("Harsh"));
    }

    #[test]
    fn accepts_padded_payload() {
        let header = URL_SAFE_NO_PAD.encode(b"{}");
        let body = base64::engine::general_purpose::URL_SAFE.encode(br#"{"name":"Al"}"#);
        let token = format!("{header}.{body}.sig");

        let claims = fixed_decoder().decode(&token).expect("padding tolerated");
        assert_eq!(claims.name.as_deref(), Some("Al"));
    }

    #[test]
    fn rejects_token_without_payload() {
        assert_eq!(
            fixed_decoder().decode("just-one-part"),
            Err(DecodeError::MissingPayload)
        );
        assert_eq!(fixed_decoder().decode("header."), Err(DecodeError::MissingPayload));
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = fixed_decoder().decode("header.!!!not-base64!!!.sig");
        assert!(matches!(result, Err(DecodeError::Base64(_))));
    }

    #[test]
    fn rejects_non_object_payload() {
        let header = URL_SAFE_NO_PAD.encode(b"{}");
        let body = URL_SAFE_NO_PAD.encode(br#""hello""#);
        let result = fixed_decoder().decode(&format!("{header}.{body}.sig"));
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let expired_at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().timestamp();
        let token = token_with_payload(&json!({"name": "Old", "exp": expired_at}));

        assert_eq!(
            fixed_decoder().decode(&token),
            Err(DecodeError::Expired { exp: expired_at })
        );
    }

    #[test]
    fn accepts_token_expiring_in_future() {
        let expires = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().timestamp();
        let token = token_with_payload(&json!({"name": "Fresh", "exp": expires}));

        let claims = fixed_decoder().decode(&token).expect("not yet expired");
        assert_eq!(claims.name.as_deref(), Some("Fresh"));
    }

    #[test]
    fn numeric_id_claim_keeps_the_name() {
        let token = token_with_payload(&json!({"id": 42, "role": "user", "name": "Harsh"}));

        let claims = fixed_decoder().decode(&token).expect("loosely typed claims");
        assert_eq!(claims.id.as_deref(), Some("42"));
        assert_eq!(claims.name.as_deref(), Some("Harsh"));
    }
}
