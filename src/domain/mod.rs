//! Domain layer - Core business objects and the seams to infrastructure
//! 
//! This layer contains:
//! - Entities: Aliases, member sets, inbound/outbound messages, parsed commands
//! - Traits: Abstractions for infrastructure (AliasStore, Notifier)

pub mod entities;
pub mod traits;
