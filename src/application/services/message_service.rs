use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::messaging::{CommandDispatcher, CommandParser};
use crate::domain::entities::{InboundMessage, OutboundMessage, ParsedCommand};
use crate::domain::traits::AliasStore;

/// Service for processing one inbound group message end to end
pub struct MessageService {
    parser: CommandParser,
    dispatcher: CommandDispatcher,
}

impl MessageService {
    pub fn new(parser: CommandParser, dispatcher: CommandDispatcher) -> Self {
        Self { parser, dispatcher }
    }

    pub fn store(&self) -> &Arc<dyn AliasStore> {
        self.dispatcher.store()
    }

    /// Parse and run an inbound message, replying as `bot_id`.
    ///
    /// Messages posted by bots are dropped before parsing. When a command
    /// fails on storage, a `Failure: ...` notice is posted on a best-effort
    /// basis before the error is returned.
    pub async fn process(&self, bot_id: &str, message: InboundMessage) -> Result<ParsedCommand, BotError> {
        if message.is_from_bot() {
            tracing::info!("Triggered by {} in group {}, ignoring", message.sender_type.as_str(), message.group_id);
            return Ok(ParsedCommand::Ignored);
        }

        let command = self.parser.parse(&message);
        tracing::debug!("[{}] {:?} -> {}", message.group_id, message.text, command.as_str());

        match self.dispatcher.dispatch(bot_id, &message.group_id, command.clone()).await {
            Ok(()) => Ok(command),
            Err(e) => {
                tracing::warn!("[{}] {} failed: {}", message.group_id, command.as_str(), e);
                if e.should_notify() {
                    self.notify_failure(bot_id, &e).await;
                }
                Err(e)
            }
        }
    }

    async fn notify_failure(&self, bot_id: &str, error: &BotError) {
        let notice = OutboundMessage::text(bot_id, format!("Failure: {}", error));
        if let Err(e) = self.dispatcher.notifier().post(&notice).await {
            tracing::error!("Failed to send failure notice: {}", e);
        }
    }
}
