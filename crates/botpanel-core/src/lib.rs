//! botpanel-core: Bot API client and admin operations for Pawz Bot Panel.
//!
//! The only component doing I/O is [`engine::bot_api::HttpBotClient`], which
//! implements [`atoms::traits::BotTransport`]: one call in, one normalized
//! result out. Everything in [`engine::telegram`] and [`engine::discovery`]
//! is a thin composition over that trait.

pub mod atoms;
pub mod engine;

pub use atoms::error::{BotError, BotResult, TransportError};
pub use atoms::traits::BotTransport;
pub use atoms::types::{
    BotUser, Chat, ChatKind, ChatTarget, Credential, Envelope, FileUpload, ParamValue, Params, Update, User,
};
pub use engine::bot_api::HttpBotClient;
pub use engine::config::PanelConfig;
pub use engine::discovery::{discover, DiscoveredChat, DiscoveredUser, Discovery};
pub use engine::telegram::{OutgoingMessage, ParseMode, PhotoSource};
pub use engine::whatsapp::click_to_chat_link;
