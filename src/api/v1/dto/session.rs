use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body for `POST /session`.
///
/// The identity is assumed to be already authenticated by the upstream
/// credential/OTP check; this API only mints the session for it.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    /// Seconds until the session (and its cookie) expire.
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
}
