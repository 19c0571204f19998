//! Japanese tutor backend.
//!
//! The server half turns an English question into a structured translation
//! with a per-chunk grammar breakdown by prompting a hosted language model.
//! The client half, [`conversation::ConversationStore`], keeps the
//! conversation history and plays answers through a host speech facility.

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod generation;
pub mod lesson;
pub mod model;
