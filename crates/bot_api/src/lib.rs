//! Platform-independent command logic for the Construxis economy bot.
//!
//! Everything observable about a command's behavior lives here: the typed
//! command set, the dispatcher, the per-command handlers, the user-link
//! and entity-permission stores, and the reply model the Discord layer
//! renders. No Discord SDK types appear in this crate.

pub mod commands;
pub mod dispatch;
pub mod handlers;
pub mod links;
pub mod notify;
pub mod perms;
pub mod reply;

pub use commands::{ButtonCommand, Command, CommandArgs};
pub use dispatch::{dispatch, dispatch_button, BotContext, Invocation};
pub use notify::Notifier;
pub use reply::Reply;

#[cfg(test)]
mod tests;
