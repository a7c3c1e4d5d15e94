//! Domain entities - Core business objects with no infrastructure dependencies

pub mod command;
pub mod member;
pub mod message;

pub use command::ParsedCommand;
pub use member::{MemberId, MemberSet, MEMBER_DELIMITER};
pub use message::{Attachment, InboundMessage, Mentions, OutboundMessage, SenderType};
