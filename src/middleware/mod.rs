/*
 * Responsibility
 * - Public interface for middleware (re-export)
 */
pub mod auth;
pub mod http;
