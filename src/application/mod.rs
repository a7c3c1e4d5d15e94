//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Per-request message handling
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing, set reconciliation, dispatching

pub mod errors;
pub mod services;
pub mod messaging;
