/*
 * Responsibility
 * - Session authentication services: token codec + cookie transport
 * - AuthService facade shared via AppState (issue + verify, fail closed
 *   when no secret is configured)
 */
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

pub mod cookie;
pub mod token;

use token::{TokenError, TokenIssuer, TokenVerifier};

/// Process-wide authentication service.
///
/// Built once from the configured secret and shared read-only through
/// `AppState`; cloning is cheap (`Arc` inside). When the secret is empty the
/// service is constructed in a disabled state and every call fails closed —
/// a misconfigured deployment must never behave as if auth were optional.
#[derive(Clone, Debug)]
pub struct AuthService {
    inner: Option<Arc<Inner>>,
}

#[derive(Debug)]
struct Inner {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl AuthService {
    pub fn from_secret(secret: &[u8]) -> Self {
        match (TokenIssuer::new(secret), TokenVerifier::new(secret)) {
            (Ok(issuer), Ok(verifier)) => Self {
                inner: Some(Arc::new(Inner { issuer, verifier })),
            },
            _ => {
                warn!("session secret is empty; all authenticated routes will reject");
                Self { inner: None }
            }
        }
    }

    /// Disabled service (no secret). Every issue/verify call fails closed.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let inner = self.inner.as_ref().ok_or(TokenError::MissingSecret)?;
        inner.issuer.issue(user_id)
    }

    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let inner = self.inner.as_ref().ok_or(TokenError::MissingSecret)?;
        inner.verifier.verify(token)
    }
}
