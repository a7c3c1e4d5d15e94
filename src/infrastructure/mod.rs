//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: Alias persistence (Redis, in-memory)
//! - Adapters: Chat platform notifiers (GroupMe, console)
//! - Server: Inbound webhook endpoint

pub mod config;
pub mod storage;
pub mod adapters;
pub mod server;
