//! Command dispatcher - Runs parsed commands against the alias store
//!
//! Stateless across requests. Each alias update is a plain
//! read-modify-write with no isolation: two concurrent updates of the same
//! alias can lose one of them (last write wins).

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::{MemberSet, Mentions, OutboundMessage, ParsedCommand};
use crate::domain::traits::{AliasStore, Notifier};
use super::reconcile::{merge, subtract};

/// Reply to anything addressed to the bot that no rule understood
pub const WRONG_SYNTAX: &str = "Wrong syntax";

/// Header of the alias listing
pub const LIST_HEADER: &str = "Aliases: \n";

/// Dispatcher policy knobs
#[derive(Debug, Clone, Default)]
pub struct DispatchSettings {
    /// Skip posting when a mentioned alias resolves to nobody
    pub suppress_empty_mentions: bool,
}

/// Routes a ParsedCommand to the reconciler, the store and the notifier
pub struct CommandDispatcher {
    store: Arc<dyn AliasStore>,
    notifier: Arc<dyn Notifier>,
    settings: DispatchSettings,
}

impl CommandDispatcher {
    pub fn new(store: Arc<dyn AliasStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            settings: DispatchSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DispatchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn store(&self) -> &Arc<dyn AliasStore> {
        &self.store
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Execute `command` for `group_id`, replying as `bot_id`
    pub async fn dispatch(&self, bot_id: &str, group_id: &str, command: ParsedCommand) -> Result<(), BotError> {
        match command {
            ParsedCommand::AddMembers { alias, ids } => {
                let current = self.store.get_members(group_id, &alias).await?;
                tracing::info!("Adding {} to {} as {} in group {}", ids, current, alias, group_id);

                let merged = merge(&current, &ids);
                let reply = if merged.is_empty() {
                    tracing::debug!("Nothing to store for {}", alias);
                    format!("{} has no members", alias)
                } else {
                    self.store.put_members(group_id, &alias, &merged).await?;
                    format!("{} now has {} member(s)", alias, merged.len())
                };
                self.notifier.post(&OutboundMessage::text(bot_id, reply)).await
            }
            ParsedCommand::RemoveMembers { alias, ids } => {
                let current = self.store.get_members(group_id, &alias).await?;
                tracing::info!("Removing {} from {} as {} in group {}", ids, current, alias, group_id);

                let remaining = subtract(&current, &ids);
                let reply = if current.is_empty() {
                    format!("{} has no members", alias)
                } else if remaining.is_empty() {
                    self.store.delete_alias(group_id, &alias).await?;
                    format!("{} is now empty and was removed", alias)
                } else {
                    self.store.put_members(group_id, &alias, &remaining).await?;
                    format!("{} now has {} member(s)", alias, remaining.len())
                };
                self.notifier.post(&OutboundMessage::text(bot_id, reply)).await
            }
            ParsedCommand::ListAliases => {
                let mut aliases = self.store.list_aliases(group_id).await?;
                aliases.sort();
                tracing::info!("Listing aliases {:?} for group {}", aliases, group_id);

                let text = format!("{}{}", LIST_HEADER, aliases.join("\n"));
                self.notifier.post(&OutboundMessage::text(bot_id, text)).await
            }
            ParsedCommand::MentionAlias { alias } => {
                let members = self.store.get_members(group_id, &alias).await?;
                tracing::info!("Mentioning {} as {} in group {}", members, alias, group_id);

                if members.is_empty() && self.settings.suppress_empty_mentions {
                    tracing::debug!("{} has no members, not posting", alias);
                    return Ok(());
                }
                self.notifier.post(&mention_message(bot_id, &alias, &members)).await
            }
            ParsedCommand::Unrecognized => {
                tracing::info!("Unrecognized command in group {}", group_id);
                self.notifier.post(&OutboundMessage::text(bot_id, WRONG_SYNTAX)).await
            }
            ParsedCommand::Ignored => Ok(()),
        }
    }
}

/// `" @alias: See above ^"` with every member mentioned over the alias span
fn mention_message(bot_id: &str, alias: &str, members: &MemberSet) -> OutboundMessage {
    let text = format!(" {}: See above ^", alias);
    let locus = [1, alias.chars().count()];
    OutboundMessage::text(bot_id, text).with_mentions(Mentions::covering(members, locus))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_message_marks_alias_span() {
        let members: MemberSet = ["7", "8"].into_iter().collect();
        let msg = mention_message("token", "@team", &members);

        assert_eq!(msg.bot_id, "token");
        assert_eq!(msg.text, " @team: See above ^");
        let mentions = msg.mentions().expect("mentions attachment");
        assert_eq!(mentions.user_ids, vec!["7".to_string(), "8".to_string()]);
        assert_eq!(mentions.loci, vec![[1, 5], [1, 5]]);
        assert_eq!(&msg.text[1..6], "@team");
    }

    #[test]
    fn test_mention_message_without_members() {
        let msg = mention_message("token", "@nobody", &MemberSet::new());
        let mentions = msg.mentions().expect("mentions attachment");
        assert!(mentions.user_ids.is_empty());
        assert!(mentions.loci.is_empty());
    }
}
