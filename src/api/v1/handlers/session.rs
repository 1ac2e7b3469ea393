/*
 * Responsibility
 * - POST /session: issue a token and set the session cookie
 * - DELETE /session: write the removal cookie (logout)
 * - Credential verification against the user/OTP store happens upstream;
 *   this handler only runs the issuance flow (codec → transport → response)
 */
use axum::{Json, extract::State, http::HeaderMap};
use axum_extra::extract::CookieJar;
use tracing::error;

use crate::api::v1::dto::session::{CreateSessionRequest, SessionResponse};
use crate::error::AppError;
use crate::services::auth::cookie;
use crate::services::auth::token::{SESSION_TTL_SECS, TokenError};
use crate::state::AppState;

pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let token = state.auth.issue(req.user_id).map_err(|e| match e {
        TokenError::InvalidUserId => AppError::InvalidRequest("user_id must not be nil".into()),
        other => {
            error!(error = %other, "session issuance failed");
            AppError::Internal
        }
    })?;

    let secure = state.cookies.secure_for_request(&headers);
    let cookie = cookie::session_cookie(token, state.cookies.domain.as_deref(), secure);

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            user_id: req.user_id,
            expires_in: SESSION_TTL_SECS,
        }),
    ))
}

pub async fn delete_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    let secure = state.cookies.secure_for_request(&headers);
    let cookie = cookie::removal_cookie(state.cookies.domain.as_deref(), secure);

    (jar.add(cookie), Json(serde_json::json!({"success": true})))
}
