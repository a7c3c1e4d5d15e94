use async_trait::async_trait;

use crate::application::errors::StorageError;
use crate::domain::entities::MemberSet;

/// AliasStore trait - persistence of (group, alias) -> member set
///
/// An alias with no members is never stored; reading an absent alias
/// yields an empty set rather than an error.
#[async_trait]
pub trait AliasStore: Send + Sync {
    /// Members behind `alias`. Empty when absent or the stored value is unreadable.
    async fn get_members(&self, group_id: &str, alias: &str) -> Result<MemberSet, StorageError>;

    /// Overwrite the members behind `alias`
    async fn put_members(&self, group_id: &str, alias: &str, members: &MemberSet) -> Result<(), StorageError>;

    /// Drop `alias` entirely
    async fn delete_alias(&self, group_id: &str, alias: &str) -> Result<(), StorageError>;

    /// Names of every alias defined in the group
    async fn list_aliases(&self, group_id: &str) -> Result<Vec<String>, StorageError>;

    /// Connectivity probe
    async fn ping(&self) -> Result<(), StorageError>;
}
