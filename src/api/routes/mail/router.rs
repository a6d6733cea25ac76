//! Router for the mail API

use std::sync::Arc;

use axum::{Router, extract::State, response::Json};
use axum_extra::extract::Query;

use super::public;
use crate::api::BearerToken;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::mail::MailError;

type SharedState = Arc<AppState>;

async fn mails_handler(
    State(state): State<SharedState>,
    BearerToken(access_token): BearerToken,
) -> Result<Json<Vec<public::NormalizedEmail>>, ApiError> {
    let max_results = state.config.recent_max_results;
    let emails = state
        .mail
        .retrieve_recent(&access_token, max_results)
        .await
        .map_err(|e| ApiError::from_mail(e, "Error retrieving mail data"))?;

    Ok(Json(emails))
}

async fn search_emails_handler(
    State(state): State<SharedState>,
    BearerToken(access_token): BearerToken,
    Query(params): Query<public::SearchEmailsQuery>,
) -> Result<Json<Vec<public::NormalizedEmail>>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| MailError::Validation("Search query is required.".to_string()))?;

    let emails = state
        .mail
        .retrieve_matching(&access_token, &query)
        .await
        .map_err(|e| ApiError::from_mail(e, "Error searching emails"))?;

    Ok(Json(emails))
}

/// Create the mail router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/mails", axum::routing::get(mails_handler))
        .route("/search-emails", axum::routing::get(search_emails_handler))
}
