/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The session middleware verifies and stores it in request extensions;
 *   handlers only ever receive this type
 *
 * Notes
 * - Verification lives in middleware/services; this is the contract type
 * - A handler that takes `CurrentUser` fails closed with 401 if the gate
 *   never ran, so wiring mistakes cannot expose a protected route
 */
use axum::{extract::FromRequestParts, http::Extensions, http::request::Parts};
use uuid::Uuid;

use crate::error::AppError;

/// Identity attached to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
}

impl CurrentUser {
    /// Pure lookup; `None` means the gate did not run (or rejected), which
    /// downstream code must treat as "unauthenticated".
    pub fn from_extensions(extensions: &Extensions) -> Option<Self> {
        extensions.get::<CurrentUser>().copied()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_extensions(&parts.extensions).ok_or(AppError::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_without_gate_is_none() {
        let extensions = Extensions::new();
        assert_eq!(CurrentUser::from_extensions(&extensions), None);
    }

    #[test]
    fn lookup_after_insert_returns_identity() {
        let user = CurrentUser {
            user_id: Uuid::new_v4(),
        };
        let mut extensions = Extensions::new();
        extensions.insert(user);
        assert_eq!(CurrentUser::from_extensions(&extensions), Some(user));
    }
}
