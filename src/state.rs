/*
 * Responsibility
 * - Shared per-process context bound to the Router (AppState)
 * - Clone is cheap (Arc-backed services inside)
 */
use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::auth::cookie::CookieSettings;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: AuthService,
    pub cookies: CookieSettings,
}

impl AppState {
    pub fn new(auth: AuthService, cookies: CookieSettings) -> Self {
        Self { auth, cookies }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            auth: AuthService::from_secret(&config.session_secret),
            cookies: CookieSettings::new(
                config.cookie_domain.clone(),
                config.app_env.is_production(),
            ),
        }
    }
}
