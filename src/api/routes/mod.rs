//! API routes module

pub mod auth;
pub mod group;
pub mod mail;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Mail listing and search routes
        .merge(mail::router())
        // OAuth code exchange
        .merge(auth::router())
}
