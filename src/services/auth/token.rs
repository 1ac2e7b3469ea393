//! Session token codec: issuance and verification of the signed session token.
//!
//! Tokens are standard three-part signed claim tokens (header/payload/signature)
//! carrying a fixed, statically-typed claim set. HS256 is the single accepted
//! algorithm; anything else in the header is rejected at verify time so a
//! tampered header cannot downgrade the signature check.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Fixed session lifetime. `exp` is always `iat` + this value.
pub const SESSION_TTL_SECS: i64 = 30 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    /// The shared secret is empty/unconfigured. Always fails closed.
    #[error("session secret is not configured")]
    MissingSecret,

    /// Issuance was asked to mint a token for the nil identity.
    #[error("invalid user id")]
    InvalidUserId,

    /// Signing failed. Practically unreachable for HMAC over in-memory
    /// bytes, surfaced as an internal error if it ever happens.
    #[error("failed to sign session token")]
    Signing,

    /// The single externally visible verification failure. Malformed
    /// encoding, bad signature, wrong algorithm, expiry and claim-shape
    /// mismatches are all collapsed into this variant; the concrete cause
    /// is only logged.
    #[error("invalid token")]
    VerificationFailed,
}

/// Claims embedded in every session token.
///
/// `sub` is the canonical 128-bit identity. `jti` is a fresh random id per
/// token, kept for log correlation; nothing is persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// Signs session tokens with the shared symmetric secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenIssuer").finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
        })
    }

    /// Mint a signed token asserting `user_id` for the next 30 minutes.
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        if user_id.is_nil() {
            return Err(TokenError::InvalidUserId);
        }

        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id,
            iat: now,
            exp: now + SESSION_TTL_SECS,
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            warn!(error = %e, "failed to sign session token");
            TokenError::Signing
        })
    }
}

/// Verifies session tokens.
///
/// Construct once and share: the `Validation` (algorithm allow-list, strict
/// expiry) is immutable after construction, so concurrent use from many
/// request tasks is safe without locking.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        // HS256 only; a token claiming any other algorithm is rejected
        // outright rather than ignored.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Verify `token` and return the identity it asserts.
    ///
    /// Pure function of {token, key, current time}; verifying the same token
    /// twice within its lifetime yields the same identity with no side effects.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!(error = %e, "session token rejected");
                TokenError::VerificationFailed
            })?;

        // A signed claim for the nil identity is never valid.
        if data.claims.sub.is_nil() {
            warn!("session token rejected: nil subject");
            return Err(TokenError::VerificationFailed);
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-session-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET).unwrap()
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET).unwrap()
    }

    #[test]
    fn roundtrip_returns_issued_identity() {
        let user_id = Uuid::new_v4();
        let token = issuer().issue(user_id).unwrap();
        assert_eq!(verifier().verify(&token).unwrap(), user_id);
    }

    #[test]
    fn verification_is_idempotent() {
        let user_id = Uuid::new_v4();
        let token = issuer().issue(user_id).unwrap();
        let v = verifier();
        assert_eq!(v.verify(&token).unwrap(), user_id);
        assert_eq!(v.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn wrong_key_is_rejected() {
        let token = issuer().issue(Uuid::new_v4()).unwrap();
        let other = TokenVerifier::new(b"some-other-secret").unwrap();
        assert!(matches!(
            other.verify(&token),
            Err(TokenError::VerificationFailed)
        ));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(matches!(
            verifier().verify("not-a-token"),
            Err(TokenError::VerificationFailed)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Craft a token whose lifetime already elapsed.
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            iat: now - SESSION_TTL_SECS - 60,
            exp: now - 60,
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            verifier().verify(&token),
            Err(TokenError::VerificationFailed)
        ));
    }

    #[test]
    fn foreign_algorithm_is_rejected() {
        // Same secret, different HMAC variant: must fail the allow-list,
        // not fall through to a signature check.
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            verifier().verify(&token),
            Err(TokenError::VerificationFailed)
        ));
    }

    #[test]
    fn nil_subject_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: Uuid::nil(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            verifier().verify(&token),
            Err(TokenError::VerificationFailed)
        ));
    }

    #[test]
    fn issue_rejects_nil_identity() {
        assert!(matches!(
            issuer().issue(Uuid::nil()),
            Err(TokenError::InvalidUserId)
        ));
    }

    #[test]
    fn empty_secret_is_rejected_at_construction() {
        assert!(matches!(
            TokenIssuer::new(b""),
            Err(TokenError::MissingSecret)
        ));
        assert!(matches!(
            TokenVerifier::new(b""),
            Err(TokenError::MissingSecret)
        ));
    }
}
