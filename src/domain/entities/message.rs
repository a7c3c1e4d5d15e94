use serde::{Deserialize, Deserializer, Serialize};

use super::MemberSet;

/// Who posted an inbound message
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SenderType {
    #[default]
    User,
    Bot,
    System,
    Other(String),
}

impl SenderType {
    pub fn as_str(&self) -> &str {
        match self {
            SenderType::User => "user",
            SenderType::Bot => "bot",
            SenderType::System => "system",
            SenderType::Other(s) => s,
        }
    }
}

impl From<String> for SenderType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => SenderType::User,
            "bot" => SenderType::Bot,
            "system" => SenderType::System,
            _ => SenderType::Other(value),
        }
    }
}

/// Mention annotation: which members are referenced and the text span
/// (`[start, length]`) each one covers
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Mentions {
    #[serde(default)]
    pub user_ids: Vec<String>,
    #[serde(default)]
    pub loci: Vec<[usize; 2]>,
}

impl Mentions {
    /// Mention every member of `members`, each covering the same text span
    pub fn covering(members: &MemberSet, locus: [usize; 2]) -> Self {
        let user_ids = members.to_vec();
        let loci = vec![locus; user_ids.len()];
        Self { user_ids, loci }
    }
}

/// Message attachment, tagged by its `type` field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Attachment {
    Mentions(Mentions),
    Image {
        #[serde(default)]
        url: String,
    },
    #[serde(other)]
    Other,
}

/// First mentions attachment in a list, if any
pub fn first_mentions(attachments: &[Attachment]) -> Option<&Mentions> {
    attachments.iter().find_map(|a| match a {
        Attachment::Mentions(m) => Some(m),
        _ => None,
    })
}

/// Callback payload posted by the chat platform for every group message
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub group_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
    #[serde(default)]
    pub sender_type: SenderType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attachments: Vec<Attachment>,
}

impl InboundMessage {
    pub fn new(group_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            text: text.into(),
            sender_type: SenderType::User,
            attachments: Vec::new(),
        }
    }

    pub fn with_sender_type(mut self, sender_type: SenderType) -> Self {
        self.sender_type = sender_type;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Attach a mentions annotation for `user_ids` (loci left empty)
    pub fn with_mentions<S: Into<String>>(self, user_ids: impl IntoIterator<Item = S>) -> Self {
        self.with_attachment(Attachment::Mentions(Mentions {
            user_ids: user_ids.into_iter().map(Into::into).collect(),
            loci: Vec::new(),
        }))
    }

    pub fn is_from_bot(&self) -> bool {
        self.sender_type == SenderType::Bot
    }

    /// The first mentions attachment. Later ones are ignored.
    pub fn mentions(&self) -> Option<&Mentions> {
        first_mentions(&self.attachments)
    }

    /// Ids explicitly mentioned in the message
    pub fn mentioned_members(&self) -> MemberSet {
        self.mentions()
            .map(|m| m.user_ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether the message mentions at least one storable member id
    pub fn has_mentions(&self) -> bool {
        !self.mentioned_members().is_empty()
    }
}

/// Message posted back to the group through the bot-post endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub bot_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl OutboundMessage {
    pub fn text(bot_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_mentions(mut self, mentions: Mentions) -> Self {
        self.attachments.push(Attachment::Mentions(mentions));
        self
    }

    pub fn mentions(&self) -> Option<&Mentions> {
        first_mentions(&self.attachments)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
