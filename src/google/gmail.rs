//! Gmail API client for listing and fetching messages of the mailbox
//! that owns a bearer token.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::mail::MailError;

pub const GMAIL_API_URL: &str = "https://gmail.googleapis.com";

/// Message and thread structures from Gmail API documentation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessageResponse {
    pub id: String,
    #[serde(rename = "threadId", default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Option<Vec<MessageResponse>>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(rename = "resultSizeEstimate")]
    pub result_size_estimate: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "threadId", default)]
    pub thread_id: Option<String>,
    pub snippet: Option<String>,
    pub payload: Option<MessagePayload>,
    #[serde(rename = "labelIds")]
    pub label_ids: Option<Vec<String>>,
    #[serde(rename = "internalDate")]
    pub internal_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePartBody {
    #[serde(rename = "attachmentId")]
    pub attachment_id: Option<String>,
    #[serde(default)]
    pub size: u64,
    // Base64 encoded
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "partId")]
    pub part_id: Option<String>,
    #[serde(rename = "mimeType", default)]
    pub mimetype: String,
    pub body: Option<MessagePartBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagePayload {
    pub headers: Option<Vec<MessageHeader>>,
    #[serde(rename = "mimeType", default)]
    pub mimetype: String,
    pub body: Option<MessagePartBody>,
    pub parts: Option<Vec<MessagePart>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 message body into UTF-8 text.
///
/// Gmail sends body data in the URL safe alphabet, usually padded. The
/// standard alphabet and unpadded input are accepted as well.
pub fn decode_base64(data: &str) -> Result<String, MailError> {
    let data = data.trim();
    let engine = if data.contains(['+', '/']) {
        &STANDARD_LENIENT
    } else {
        &URL_SAFE_LENIENT
    };
    let bytes = engine
        .decode(data)
        .map_err(|e| MailError::Normalization(format!("Invalid base64 body: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| MailError::Normalization(format!("Body is not valid UTF-8: {}", e)))
}

/// Turn a failed Gmail response into an upstream error, preferring the
/// message Google puts in the JSON error body.
fn upstream_error(status: StatusCode, text: &str) -> MailError {
    let detail = serde_json::from_str::<GoogleErrorResponse>(text)
        .map(|body| body.error.message)
        .unwrap_or_else(|_| text.to_string());
    MailError::upstream(
        Some(status.as_u16()),
        format!("Gmail request failed: {} ({})", status, detail),
    )
}

/// Operations against one authenticated mailbox.
#[async_trait]
pub trait MailClient: Send + Sync {
    /// The most recent `max_results` message references
    async fn list_recent(&self, max_results: u32) -> Result<Vec<MessageResponse>, MailError>;

    /// Message references matching a Gmail search query
    async fn list_matching(&self, query: &str) -> Result<Vec<MessageResponse>, MailError>;

    /// Full content of a single message
    async fn get_message(&self, id: &str) -> Result<Message, MailError>;
}

/// Builds a [`MailClient`] bound to a bearer token.
pub trait MailClientFactory: Send + Sync {
    fn client(&self, access_token: &str) -> Arc<dyn MailClient>;
}

/// Factory for clients of the Gmail REST API. The underlying HTTP
/// connection pool is shared by every client it hands out.
#[derive(Clone, Debug)]
pub struct Gmail {
    http: Client,
    base_url: String,
}

impl Gmail {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Gmail {
    fn default() -> Self {
        Self::new(GMAIL_API_URL)
    }
}

impl MailClientFactory for Gmail {
    fn client(&self, access_token: &str) -> Arc<dyn MailClient> {
        Arc::new(GmailClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            access_token: access_token.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct GmailClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl GmailClient {
    fn messages_url(&self) -> String {
        format!("{}/gmail/v1/users/me/messages", self.base_url)
    }

    async fn list(&self, url: &str) -> Result<Vec<MessageResponse>, MailError> {
        let msgs: ListMessagesResponse = self.get_json(url).await?;
        Ok(msgs.messages.unwrap_or_default())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MailError> {
        let res = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(upstream_error(status, &text));
        }
        serde_json::from_str(&text).map_err(|e| {
            MailError::upstream(
                Some(status.as_u16()),
                format!("Invalid Gmail response: {}", e),
            )
        })
    }
}

#[async_trait]
impl MailClient for GmailClient {
    async fn list_recent(&self, max_results: u32) -> Result<Vec<MessageResponse>, MailError> {
        let url = format!("{}?maxResults={}", self.messages_url(), max_results);
        self.list(&url).await
    }

    async fn list_matching(&self, query: &str) -> Result<Vec<MessageResponse>, MailError> {
        let url = format!("{}?q={}", self.messages_url(), urlencoding::encode(query));
        self.list(&url).await
    }

    async fn get_message(&self, id: &str) -> Result<Message, MailError> {
        let url = format!(
            "{}/{}?format=full",
            self.messages_url(),
            urlencoding::encode(id)
        );
        self.get_json(&url).await
    }
}
