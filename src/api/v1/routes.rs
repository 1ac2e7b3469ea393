/*
 * Responsibility
 * - v1 URL structure
 * - Decides which routes sit behind the session gate
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{
    health::health,
    me::me,
    session::{create_session, delete_session},
};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    // Issuance and logout are reachable without a session; everything else
    // goes through the gate.
    let public = Router::new()
        .route("/health", get(health))
        .route("/session", post(create_session).delete(delete_session));

    let protected = Router::new().route("/me", get(me));
    let protected = middleware::auth::session::apply(protected, state);

    public.merge(protected)
}
