/// Telegram command definitions
pub mod commands;
/// Conversation state machine and completion procedure
pub mod dialogue;
/// Update routing and per-chat state handling
pub mod handlers;
