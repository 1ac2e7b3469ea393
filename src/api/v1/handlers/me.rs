/*
 * Responsibility
 * - GET /me: protected endpoint returning the authenticated identity
 * - Demonstrates the gate → extractor handoff end to end
 */
use axum::Json;

use crate::api::v1::dto::session::MeResponse;
use crate::api::v1::extractors::CurrentUser;

pub async fn me(user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
    })
}
