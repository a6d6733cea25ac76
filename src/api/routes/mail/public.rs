//! Public types for the mail API
use serde::Deserialize;

pub use crate::mail::NormalizedEmail;

#[derive(Deserialize)]
pub struct SearchEmailsQuery {
    pub query: Option<String>,
}
