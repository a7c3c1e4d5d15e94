//! In-memory alias store for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::MemberSet;
use crate::domain::traits::AliasStore;

/// group id -> alias -> members
type Groups = HashMap<String, HashMap<String, MemberSet>>;

/// Process-local store. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    groups: Arc<RwLock<Groups>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AliasStore for MemoryStore {
    async fn get_members(&self, group_id: &str, alias: &str) -> Result<MemberSet, StorageError> {
        let groups = self.groups.read().await;
        Ok(groups
            .get(group_id)
            .and_then(|aliases| aliases.get(alias))
            .cloned()
            .unwrap_or_default())
    }

    async fn put_members(&self, group_id: &str, alias: &str, members: &MemberSet) -> Result<(), StorageError> {
        let mut groups = self.groups.write().await;
        groups
            .entry(group_id.to_string())
            .or_insert_with(HashMap::new)
            .insert(alias.to_string(), members.clone());
        Ok(())
    }

    async fn delete_alias(&self, group_id: &str, alias: &str) -> Result<(), StorageError> {
        let mut groups = self.groups.write().await;
        if let Some(aliases) = groups.get_mut(group_id) {
            aliases.remove(alias);
            if aliases.is_empty() {
                groups.remove(group_id);
            }
        }
        Ok(())
    }

    async fn list_aliases(&self, group_id: &str) -> Result<Vec<String>, StorageError> {
        let groups = self.groups.read().await;
        Ok(groups
            .get(group_id)
            .map(|aliases| aliases.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> MemberSet {
        ids.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_absent_alias_is_empty() {
        let store = MemoryStore::new();
        assert!(store.get_members("g", "@team").await.unwrap().is_empty());
        assert!(store.list_aliases("g").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStore::new();
        store.put_members("g", "@team", &set(&["1", "2"])).await.unwrap();
        store.put_members("g", "@ops", &set(&["3"])).await.unwrap();
        store.put_members("other", "@team", &set(&["9"])).await.unwrap();

        assert_eq!(store.get_members("g", "@team").await.unwrap(), set(&["1", "2"]));

        let mut aliases = store.list_aliases("g").await.unwrap();
        aliases.sort();
        assert_eq!(aliases, vec!["@ops".to_string(), "@team".to_string()]);

        store.delete_alias("g", "@team").await.unwrap();
        assert!(store.get_members("g", "@team").await.unwrap().is_empty());
        assert_eq!(store.list_aliases("g").await.unwrap(), vec!["@ops".to_string()]);
        assert_eq!(store.get_members("other", "@team").await.unwrap(), set(&["9"]));
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put_members("g", "@team", &set(&["1", "2"])).await.unwrap();
        store.put_members("g", "@team", &set(&["3"])).await.unwrap();
        assert_eq!(store.get_members("g", "@team").await.unwrap(), set(&["3"]));
    }
}
