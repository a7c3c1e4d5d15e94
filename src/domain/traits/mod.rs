//! Domain traits - Abstractions for infrastructure implementations

pub mod notifier;
pub mod store;

pub use notifier::Notifier;
pub use store::AliasStore;
