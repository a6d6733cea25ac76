//! OAuth authorization code exchange against Google's token endpoint

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::mail::MailError;

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'static str,
}

#[derive(Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchange an authorization code for tokens. Errors carry Google's
/// `error_description` when the response has one.
pub async fn exchange_code_for_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse, MailError> {
    let req = TokenRequest {
        code,
        client_id,
        client_secret,
        redirect_uri,
        grant_type: "authorization_code",
    };
    let res = Client::new().post(token_url).json(&req).send().await?;
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        let detail = serde_json::from_str::<TokenErrorResponse>(&text)
            .ok()
            .and_then(|e| e.error_description.or(e.error))
            .unwrap_or(text);
        return Err(MailError::upstream(
            Some(status.as_u16()),
            format!("Token request failed with status {}: {}", status, detail),
        ));
    }
    serde_json::from_str(&text).map_err(|e| {
        MailError::upstream(
            Some(status.as_u16()),
            format!("Invalid token response: {}", e),
        )
    })
}
