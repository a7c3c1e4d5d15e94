//! Alias storage implementations
//!
//! Stored values are member ids joined by [`MEMBER_DELIMITER`]. Decoding
//! never fails: anything unreadable is treated as an empty alias.

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use crate::domain::entities::{MemberSet, MEMBER_DELIMITER};

/// Flatten a member set into its stored form
pub fn encode_members(members: &MemberSet) -> String {
    let ids: Vec<&str> = members.iter().map(String::as_str).collect();
    ids.join(&MEMBER_DELIMITER.to_string())
}

/// Read a stored value back into a member set
pub fn decode_members(raw: &[u8]) -> MemberSet {
    match std::str::from_utf8(raw) {
        Ok(joined) => joined.split(MEMBER_DELIMITER).filter(|id| !id.is_empty()).collect(),
        Err(e) => {
            tracing::warn!("Unreadable alias value, treating as empty: {}", e);
            MemberSet::new()
        }
    }
}
