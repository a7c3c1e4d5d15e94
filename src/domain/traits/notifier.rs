use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::OutboundMessage;

/// Notifier trait - delivers bot messages to the chat platform
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post a message. Any non-2xx answer is a delivery failure.
    async fn post(&self, message: &OutboundMessage) -> Result<(), BotError>;
}
