//! Redis-backed alias store
//!
//! One hash per group at `<prefix>:group:<group_id>`; each field is an alias
//! name and its value the `|`-joined member ids.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::application::errors::StorageError;
use crate::domain::entities::MemberSet;
use crate::domain::traits::AliasStore;
use super::{decode_members, encode_members};

/// Default namespace for keys
pub const DEFAULT_KEY_PREFIX: &str = "mentions-bot";

/// Redis store sharing one multiplexed, auto-reconnecting connection
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    pub async fn connect(url: &str, key_prefix: impl Into<String>) -> Result<Self, StorageError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_connection_manager().await?;
        tracing::info!("Connected to redis at {}", url);
        Ok(Self {
            conn,
            key_prefix: key_prefix.into(),
        })
    }

    fn group_key(&self, group_id: &str) -> String {
        group_key(&self.key_prefix, group_id)
    }
}

fn group_key(prefix: &str, group_id: &str) -> String {
    format!("{}:group:{}", prefix, group_id)
}

impl From<redis::RedisError> for StorageError {
    fn from(e: redis::RedisError) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

fn unavailable(e: redis::RedisError) -> StorageError {
    tracing::warn!("Redis request failed: {}", e);
    StorageError::from(e)
}

#[async_trait]
impl AliasStore for RedisStore {
    async fn get_members(&self, group_id: &str, alias: &str) -> Result<MemberSet, StorageError> {
        let mut conn = self.conn.clone();
        let raw: Option<Vec<u8>> = conn
            .hget(self.group_key(group_id), alias)
            .await
            .map_err(unavailable)?;
        Ok(raw.map(|value| decode_members(&value)).unwrap_or_default())
    }

    async fn put_members(&self, group_id: &str, alias: &str, members: &MemberSet) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .hset(self.group_key(group_id), alias, encode_members(members))
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn delete_alias(&self, group_id: &str, alias: &str) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .hdel(self.group_key(group_id), alias)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn list_aliases(&self, group_id: &str) -> Result<Vec<String>, StorageError> {
        let mut conn = self.conn.clone();
        let aliases: Vec<String> = conn
            .hkeys(self.group_key(group_id))
            .await
            .map_err(unavailable)?;
        Ok(aliases)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}
