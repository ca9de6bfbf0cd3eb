//! Notify Relay
//!
//! A small authenticated HTTP endpoint that forwards notifications to a single [Telegram] chat
//! through the [Bot API].
//!
//! Clients `POST` either a free-form message or the JSON update report of a dynamic DNS client
//! (addresses, domains and location), authenticated with a static bearer token. Each request is
//! formatted into [`MarkdownV2`] text and delivered once, with the Bot API's own status and error
//! description passed back to the caller when delivery is refused.
//!
//! [Telegram]: https://telegram.org
//! [Bot API]: https://core.telegram.org/bots/api#sendmessage
//! [`MarkdownV2`]: https://core.telegram.org/bots/api#markdownv2-style
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod message;
pub mod notifier;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use message::{FormattedText, Formatter, ParseMode, Payload};
pub use notifier::{DynNotifier, InMemoryNotifier, Notifier, TelegramNotifier};
