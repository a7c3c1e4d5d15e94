use super::MemberSet;

/// Intent recognised in an inbound message. Built once per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// `@bot add @a @b to @alias`
    AddMembers { alias: String, ids: MemberSet },
    /// `@bot remove @a from @alias`
    RemoveMembers { alias: String, ids: MemberSet },
    /// `@bot list`
    ListAliases,
    /// Ordinary message addressing an alias
    MentionAlias { alias: String },
    /// Addressed to the bot but not understood
    Unrecognized,
    /// Ordinary chat, nothing to do
    Ignored,
}

impl ParsedCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsedCommand::AddMembers { .. } => "add",
            ParsedCommand::RemoveMembers { .. } => "remove",
            ParsedCommand::ListAliases => "list",
            ParsedCommand::MentionAlias { .. } => "mention",
            ParsedCommand::Unrecognized => "unrecognized",
            ParsedCommand::Ignored => "ignored",
        }
    }
}
