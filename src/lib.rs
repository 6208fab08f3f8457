// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod chat_widget;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod dispatcher;
pub mod errors;
pub mod highlight;
pub mod key_handlers;
pub mod logging;
pub mod markdown;
pub mod scroll;
pub mod session;
pub mod status_indicator;
pub mod ui;
pub mod widget_state;

pub use chat_widget::{ChatWidget, Reply, SendOutcome};
pub use conversation::{Conversation, Message, Sender};
pub use session::SessionId;
