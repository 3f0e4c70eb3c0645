//! Chat command surface
//!
//! Parsing, dispatch and reply formatting for the text command interface.

pub mod commands;
pub mod format;
pub mod handler;

pub use commands::Command;
pub use format::{chunk_message, escape_markdown_v2};
pub use handler::BotHandler;
