//! mentions-bot - named member aliases for group chats
//!
//! Group members define aliases (`@bot add @alice @bob to @team`) and the
//! bot mentions everyone behind an alias whenever it is addressed.

pub mod application;
pub mod domain;
pub mod infrastructure;
