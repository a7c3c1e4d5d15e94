//! GroupMe adapter

use async_trait::async_trait;
use reqwest::Client;

use crate::application::errors::BotError;
use crate::domain::entities::OutboundMessage;
use crate::domain::traits::Notifier;

/// GroupMe API base URL
pub const DEFAULT_API_BASE: &str = "https://api.groupme.com";

/// Posts bot messages through the GroupMe bot-post endpoint
pub struct GroupMeNotifier {
    client: Client,
    api_base: String,
}

impl GroupMeNotifier {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
        }
    }

    /// Get the bot-post URL
    pub fn post_url(&self) -> String {
        format!("{}/v3/bots/post", self.api_base.trim_end_matches('/'))
    }
}

impl Default for GroupMeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl Notifier for GroupMeNotifier {
    async fn post(&self, message: &OutboundMessage) -> Result<(), BotError> {
        tracing::debug!("Posting as {}: {:?}", message.bot_id, message.text);

        let response = self.client
            .post(self.post_url())
            .json(message)
            .send()
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Delivery(format!("Unexpected status code: {} {}", status, body)));
        }

        Ok(())
    }
}
