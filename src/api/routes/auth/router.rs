//! Router for exchanging an OAuth authorization code

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Router, extract::State, response::Json};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::google::oauth::exchange_code_for_token;
use crate::mail::MailError;

type SharedState = Arc<AppState>;

async fn get_token_handler(
    State(state): State<SharedState>,
    payload: Result<Json<public::GetTokenRequest>, JsonRejection>,
) -> Result<Json<public::GetTokenResponse>, ApiError> {
    // A body that isn't JSON at all is treated the same as a missing code
    let code = payload
        .ok()
        .and_then(|Json(req)| req.code)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| MailError::Validation("Authorization code is required.".to_string()))?;

    let AppConfig {
        oauth_token_url,
        gmail_api_client_id,
        gmail_api_client_secret,
        gmail_api_redirect_uri,
        ..
    } = &state.config;

    let token = exchange_code_for_token(
        oauth_token_url,
        gmail_api_client_id,
        gmail_api_client_secret,
        &code,
        gmail_api_redirect_uri,
    )
    .await
    .map_err(|e| ApiError::from_mail(e, "Failed to exchange token"))?;

    Ok(Json(public::GetTokenResponse {
        access_token: token.access_token,
    }))
}

/// Create the auth router
pub fn router() -> Router<SharedState> {
    Router::new().route("/get-token", axum::routing::post(get_token_handler))
}
