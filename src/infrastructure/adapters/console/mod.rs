//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::OutboundMessage;
use crate::domain::traits::Notifier;

/// Prints outbound messages instead of posting them
#[derive(Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    fn render(message: &OutboundMessage) -> String {
        let mut line = format!("[BOT {}] {}", message.bot_id, message.text);
        if let Some(mentions) = message.mentions() {
            line.push_str(&format!(" (mentions: {})", mentions.user_ids.join(", ")));
        }
        line
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn post(&self, message: &OutboundMessage) -> Result<(), BotError> {
        println!("{}", Self::render(message));
        Ok(())
    }
}
