//! Message handling - Command parsing, set reconciliation, dispatching

pub mod dispatcher;
pub mod parser;
pub mod reconcile;

pub use dispatcher::{CommandDispatcher, DispatchSettings};
pub use parser::{CommandParser, MentionMatch};
