//! Error types shared by the Gmail client, the token exchange and the
//! retrieval pipeline

/// Coarse classification used to pick a response status without
/// matching on message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Validation,
    NotFound,
    Upstream,
    Normalization,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Missing or empty bearer token
    #[error("Access token is required.")]
    Auth,

    /// Missing required request parameter
    #[error("{0}")]
    Validation(String),

    /// The provider listed zero messages
    #[error("No messages found.")]
    NotFound,

    /// A provider call failed: bad token, rate limit, network, bad body
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Message content could not be decoded
    #[error("{0}")]
    Normalization(String),
}

impl MailError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth => ErrorKind::Auth,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound => ErrorKind::NotFound,
            Self::Upstream { .. } => ErrorKind::Upstream,
            Self::Normalization(_) => ErrorKind::Normalization,
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        Self::upstream(err.status().map(|s| s.as_u16()), err.to_string())
    }
}
