//! Session cookie verification → `CurrentUser` into request extensions.
//!
//! Per-request flow: extract the session cookie, verify the token, inject the
//! authenticated identity, or reject and short-circuit the pipeline. Every
//! rejection is terminal for the request; the protected handler never runs.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use tracing::{error, warn};

use crate::api::v1::extractors::CurrentUser;
use crate::error::AppError;
use crate::services::auth::cookie;
use crate::state::AppState;

/// Apply session authentication to every route in `router`.
///
/// Example:
/// ```ignore
/// let protected = api::v1::protected_routes();
/// let protected = middleware::auth::session::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor, so pass state
    // explicitly via from_fn_with_state.
    router.layer(middleware::from_fn_with_state(state, session_middleware))
}

async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Misconfiguration fails closed. Internally loud, externally
    // indistinguishable from a rejected credential.
    if !state.auth.is_configured() {
        error!("session secret is not configured; rejecting request");
        return Err(AppError::AuthFailed);
    }

    // Absent or empty cookie: no credential was presented.
    let token = cookie::read_session_token(req.headers()).ok_or(AppError::AuthRequired)?;

    // The verifier logs the concrete cause; the client only ever sees the
    // opaque outcome.
    let user_id = state.auth.verify(&token).inspect_err(|err| {
        warn!(error = %err, "session verification failed");
    })?;

    // middleware → extractor handoff
    req.extensions_mut().insert(CurrentUser { user_id });

    Ok(next.run(req).await)
}
