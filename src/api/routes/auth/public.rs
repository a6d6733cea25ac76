//! Public types for the token exchange API
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct GetTokenRequest {
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetTokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}
