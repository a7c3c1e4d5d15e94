//! Command parser - Classifies inbound chat messages into commands
//!
//! Messages starting with the invocation prefix are matched against an
//! ordered rule list; the first rule whose pattern matches and whose
//! constructor accepts the message wins. Everything else is checked
//! against the mention rule.

use regex_lite::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::application::errors::ConfigError;
use crate::domain::entities::{InboundMessage, ParsedCommand};

/// Alias token grammar shared by every rule
const ALIAS_PATTERN: &str = "@[A-Za-z0-9]+";

/// Where a bare alias mention may appear in ordinary chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MentionMatch {
    /// `@alias` followed by whitespace or end of message, anywhere in the text
    #[default]
    Anywhere,
    /// `@alias` must end the message
    Trailing,
}

type Constructor = fn(&Captures<'_>, &InboundMessage) -> Option<ParsedCommand>;

/// Pattern plus constructor. A constructor returning `None` passes the
/// message on to the next rule.
struct Rule {
    name: &'static str,
    pattern: Regex,
    build: Constructor,
}

/// Parses inbound messages into ParsedCommand values
pub struct CommandParser {
    prefix: String,
    rules: Vec<Rule>,
    mention: Regex,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>, list_enabled: bool, mention_match: MentionMatch) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("bot prefix must not be empty".to_string()));
        }
        let escaped = regex_lite::escape(&prefix);

        let mut rules = vec![
            Rule {
                name: "add",
                pattern: compile(&format!(r"^{escaped}\s+add\s*@.*\s*to\s+({ALIAS_PATTERN})$"))?,
                build: build_add,
            },
            Rule {
                name: "remove",
                pattern: compile(&format!(r"^{escaped}\s+remove\s*@.*\s*from\s+({ALIAS_PATTERN})$"))?,
                build: build_remove,
            },
        ];
        if list_enabled {
            rules.push(Rule {
                name: "list",
                pattern: compile(&format!(r"^{escaped}\s+list$"))?,
                build: |_, _| Some(ParsedCommand::ListAliases),
            });
        }

        let mention = match mention_match {
            MentionMatch::Anywhere => compile(&format!(r"({ALIAS_PATTERN})(\s+.*)?$"))?,
            MentionMatch::Trailing => compile(&format!(r"({ALIAS_PATTERN})$"))?,
        };

        Ok(Self { prefix, rules, mention })
    }

    /// Classify a message. Always yields exactly one command.
    pub fn parse(&self, message: &InboundMessage) -> ParsedCommand {
        let text = message.text.as_str();

        if !text.starts_with(&self.prefix) {
            return match self.mention.captures(text) {
                Some(caps) => ParsedCommand::MentionAlias { alias: caps[1].to_string() },
                None => ParsedCommand::Ignored,
            };
        }

        for rule in &self.rules {
            let Some(caps) = rule.pattern.captures(text) else {
                continue;
            };
            match (rule.build)(&caps, message) {
                Some(command) => return command,
                None => tracing::debug!("Rule '{}' matched but was rejected: {:?}", rule.name, text),
            }
        }

        ParsedCommand::Unrecognized
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidValue(format!("bad command pattern {pattern}: {e}")))
}

fn build_add(caps: &Captures<'_>, message: &InboundMessage) -> Option<ParsedCommand> {
    message.has_mentions().then(|| ParsedCommand::AddMembers {
        alias: caps[1].to_string(),
        ids: message.mentioned_members(),
    })
}

fn build_remove(caps: &Captures<'_>, message: &InboundMessage) -> Option<ParsedCommand> {
    message.has_mentions().then(|| ParsedCommand::RemoveMembers {
        alias: caps[1].to_string(),
        ids: message.mentioned_members(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MemberSet;

    fn parser() -> CommandParser {
        CommandParser::new("@bot", true, MentionMatch::Anywhere).expect("valid parser")
    }

    fn msg(text: &str) -> InboundMessage {
        InboundMessage::new("group-1", text)
    }

    #[test]
    fn test_add_members() {
        let cmd = parser().parse(&msg("@bot add @alice @bob to @team").with_mentions(["1", "2"]));
        assert_eq!(
            cmd,
            ParsedCommand::AddMembers {
                alias: "@team".to_string(),
                ids: ["1", "2"].into_iter().collect(),
            }
        );
    }

    #[test]
    fn test_remove_members() {
        let cmd = parser().parse(&msg("@bot remove @alice from @Team2").with_mentions(["1"]));
        assert_eq!(
            cmd,
            ParsedCommand::RemoveMembers {
                alias: "@Team2".to_string(),
                ids: ["1"].into_iter().collect::<MemberSet>(),
            }
        );
    }

    #[test]
    fn test_add_without_mentions_is_unrecognized() {
        assert_eq!(parser().parse(&msg("@bot add @x to @eng")), ParsedCommand::Unrecognized);
        assert_eq!(
            parser().parse(&msg("@bot add @x to @eng").with_mentions(Vec::<String>::new())),
            ParsedCommand::Unrecognized
        );
        assert_eq!(parser().parse(&msg("@bot remove @x from @eng")), ParsedCommand::Unrecognized);
    }

    #[test]
    fn test_alias_capture_is_end_anchored() {
        let cmd = parser().parse(&msg("@bot add @x to @eng please").with_mentions(["1"]));
        assert_eq!(cmd, ParsedCommand::Unrecognized);

        let cmd = parser().parse(&msg("@bot add @x to @eng!").with_mentions(["1"]));
        assert_eq!(cmd, ParsedCommand::Unrecognized);
    }

    #[test]
    fn test_list() {
        assert_eq!(parser().parse(&msg("@bot list")), ParsedCommand::ListAliases);
        assert_eq!(parser().parse(&msg("@bot   list")), ParsedCommand::ListAliases);
        assert_eq!(parser().parse(&msg("@bot list all")), ParsedCommand::Unrecognized);
    }

    #[test]
    fn test_list_disabled() {
        let parser = CommandParser::new("@bot", false, MentionMatch::Anywhere).expect("valid parser");
        assert_eq!(parser.parse(&msg("@bot list")), ParsedCommand::Unrecognized);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parser().parse(&msg("@bot")), ParsedCommand::Unrecognized);
        assert_eq!(parser().parse(&msg("@bot hello there")), ParsedCommand::Unrecognized);
        assert_eq!(parser().parse(&msg("@bot ADD @x TO @eng").with_mentions(["1"])), ParsedCommand::Unrecognized);
    }

    #[test]
    fn test_mention_anywhere() {
        assert_eq!(
            parser().parse(&msg("@team lunch?")),
            ParsedCommand::MentionAlias { alias: "@team".to_string() }
        );
        assert_eq!(
            parser().parse(&msg("hey @team lunch at noon")),
            ParsedCommand::MentionAlias { alias: "@team".to_string() }
        );
        assert_eq!(
            parser().parse(&msg("ping me at a@b.com or @ops")),
            ParsedCommand::MentionAlias { alias: "@ops".to_string() }
        );
    }

    #[test]
    fn test_mention_trailing() {
        let parser = CommandParser::new("@bot", true, MentionMatch::Trailing).expect("valid parser");
        assert_eq!(
            parser.parse(&msg("standup now @team")),
            ParsedCommand::MentionAlias { alias: "@team".to_string() }
        );
        assert_eq!(parser.parse(&msg("@team standup now")), ParsedCommand::Ignored);
    }

    #[test]
    fn test_plain_chat_is_ignored() {
        assert_eq!(parser().parse(&msg("good morning everyone")), ParsedCommand::Ignored);
        assert_eq!(parser().parse(&msg("")), ParsedCommand::Ignored);
        assert_eq!(parser().parse(&msg("mail me: a@b.com")), ParsedCommand::Ignored);
    }

    #[test]
    fn test_custom_prefix_is_escaped() {
        let parser = CommandParser::new("!mb+", true, MentionMatch::Anywhere).expect("valid parser");
        assert_eq!(parser.parse(&msg("!mb+ list")), ParsedCommand::ListAliases);
        assert_eq!(parser.parse(&msg("@bot list")), ParsedCommand::MentionAlias { alias: "@bot".to_string() });
    }

    #[test]
    fn test_empty_prefix_rejected() {
        assert!(CommandParser::new("  ", true, MentionMatch::Anywhere).is_err());
    }
}
