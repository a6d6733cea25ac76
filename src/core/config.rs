use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

use crate::google::gmail::GMAIL_API_URL;
use crate::google::oauth::GOOGLE_TOKEN_URL;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    pub static_dir: String,
    pub gmail_api_url: String,
    pub oauth_token_url: String,
    pub gmail_api_client_id: String,
    pub gmail_api_client_secret: String,
    pub gmail_api_redirect_uri: String,
    /// Number of messages listed by `/api/mails`
    pub recent_max_results: u32,
    /// Upper bound on concurrent message fetches per request
    pub max_in_flight: usize,
}

impl AppConfig {
    /// Load the config from the process environment. Missing OAuth
    /// application credentials are a fatal startup error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("Missing env var {}", key))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let gmail_api_client_id = required("CLIENT_ID")?;
        let gmail_api_client_secret = required("CLIENT_SECRET")?;
        let gmail_api_redirect_uri = required("REDIRECT_URI")?;

        let recent_max_results = parse_or(&lookup, "MAIL_RECENT_MAX_RESULTS", 20)?;
        let max_in_flight = parse_or::<usize, _>(&lookup, "MAIL_MAX_IN_FLIGHT", 10)?.max(1);

        Ok(Self {
            host: or_default("HOST", "127.0.0.1"),
            port: or_default("PORT", "3000"),
            static_dir: or_default("STATIC_DIR", "./client/build"),
            gmail_api_url: or_default("GMAIL_API_URL", GMAIL_API_URL),
            oauth_token_url: or_default("OAUTH_TOKEN_URL", GOOGLE_TOKEN_URL),
            gmail_api_client_id,
            gmail_api_client_secret,
            gmail_api_redirect_uri,
            recent_max_results,
            max_in_flight,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {}", key, value)),
        None => Ok(default),
    }
}
