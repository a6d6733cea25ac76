use std::sync::Arc;

use crate::core::AppConfig;
use crate::google::gmail::{Gmail, MailClientFactory};
use crate::mail::EmailRetrieval;

/// Handles built once at startup and shared by every request
pub struct AppState {
    pub config: AppConfig,
    pub mail: EmailRetrieval,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let gmail = Gmail::new(config.gmail_api_url.clone());
        Self::with_mail_clients(config, Arc::new(gmail))
    }

    /// Use a different source of mail clients, e.g. a stub in tests
    pub fn with_mail_clients(config: AppConfig, clients: Arc<dyn MailClientFactory>) -> Self {
        let mail = EmailRetrieval::new(clients, config.max_in_flight);
        Self { config, mail }
    }
}
