//! Chat platform adapters

pub mod console;
pub mod groupme;

pub use console::ConsoleNotifier;
pub use groupme::GroupMeNotifier;
