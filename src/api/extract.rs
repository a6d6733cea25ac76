use axum::extract::FromRequestParts;
use http::header;
use http::request::Parts;

use crate::api::public::ApiError;
use crate::mail::MailError;

/// Bearer token from the `Authorization` header. The first `Bearer `
/// is removed, a header without the scheme is taken as the token.
/// Rejects with 401 when the header is missing or empty.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.replacen("Bearer ", "", 1))
            .filter(|token| !token.trim().is_empty())
            .ok_or(MailError::Auth)?;
        Ok(Self(token))
    }
}
