/*
 * Responsibility
 * - App-wide AppError definition
 * - IntoResponse impl (HTTP status / JSON error body)
 * - Maps service-level auth errors into the two user-visible outcomes
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::token::TokenError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No credential was presented at all (missing/empty cookie, or a
    /// handler ran without the gate).
    #[error("authentication required")]
    AuthRequired,

    /// A credential was presented and rejected. Deliberately opaque:
    /// signature, algorithm, expiry and shape failures all land here.
    #[error("authentication failed")]
    AuthFailed,

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::AuthRequired => (StatusCode::UNAUTHORIZED, "AUTH_REQUIRED"),
            AppError::AuthFailed => (StatusCode::UNAUTHORIZED, "AUTH_FAILED"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            // A missing secret is an operator error, but to the client it
            // must look exactly like any other rejected credential.
            TokenError::MissingSecret | TokenError::VerificationFailed => AppError::AuthFailed,
            // Caller-side misuse of the issuance API.
            TokenError::InvalidUserId => AppError::InvalidRequest("invalid user id".into()),
            TokenError::Signing => AppError::Internal,
        }
    }
}
