//! List, fetch and normalize messages for a mailbox.
//!
//! A listing call yields message ids, then every message is fetched and
//! normalized concurrently. Failures for individual messages are logged
//! and dropped so one bad message never fails the whole request.

use std::sync::Arc;

use futures::{StreamExt, stream};

use crate::google::gmail::{MailClient, MailClientFactory, MessageResponse};
use crate::mail::{MailError, NormalizedEmail, normalize};

#[derive(Clone)]
pub struct EmailRetrieval {
    clients: Arc<dyn MailClientFactory>,
    max_in_flight: usize,
}

impl EmailRetrieval {
    pub fn new(clients: Arc<dyn MailClientFactory>, max_in_flight: usize) -> Self {
        Self {
            clients,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// The most recent `max_results` messages in the mailbox.
    pub async fn retrieve_recent(
        &self,
        access_token: &str,
        max_results: u32,
    ) -> Result<Vec<NormalizedEmail>, MailError> {
        let client = self.connect(access_token)?;
        let refs = client.list_recent(max_results).await?;
        self.fetch_all(client, refs).await
    }

    /// Messages matching a Gmail search query such as `from:alice is:unread`.
    pub async fn retrieve_matching(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Vec<NormalizedEmail>, MailError> {
        let client = self.connect(access_token)?;
        let refs = client.list_matching(query).await?;
        self.fetch_all(client, refs).await
    }

    fn connect(&self, access_token: &str) -> Result<Arc<dyn MailClient>, MailError> {
        if access_token.trim().is_empty() {
            return Err(MailError::Auth);
        }
        Ok(self.clients.client(access_token))
    }

    async fn fetch_all(
        &self,
        client: Arc<dyn MailClient>,
        refs: Vec<MessageResponse>,
    ) -> Result<Vec<NormalizedEmail>, MailError> {
        if refs.is_empty() {
            return Err(MailError::NotFound);
        }
        let total = refs.len();

        // `buffered` keeps the listing order while capping the number
        // of fetches in flight
        let emails: Vec<NormalizedEmail> = stream::iter(refs)
            .map(|msg| {
                let client = Arc::clone(&client);
                async move { fetch_one(client.as_ref(), &msg.id).await }
            })
            .buffered(self.max_in_flight)
            .filter_map(|email| async move { email })
            .collect()
            .await;

        tracing::debug!("Retrieved {} of {} messages", emails.len(), total);

        Ok(emails)
    }
}

async fn fetch_one(client: &dyn MailClient, id: &str) -> Option<NormalizedEmail> {
    let result = client
        .get_message(id)
        .await
        .and_then(|message| normalize(&message));
    match result {
        Ok(email) => Some(email),
        Err(err) => {
            tracing::warn!("Error fetching email with ID {}: {}", id, err);
            None
        }
    }
}
