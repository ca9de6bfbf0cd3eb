//! Message delivery.
//!
//! Two implementations are provided, [`telegram::TelegramNotifier`] and
//! [`memory::InMemoryNotifier`]. The former sends each message to a fixed chat through the
//! Telegram Bot API. The latter only records and logs what it is given, and backs dry run mode.

use crate::error::Error;
use crate::message::FormattedText;
use std::sync::Arc;

pub mod memory;
pub mod telegram;

#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryNotifier;
#[allow(clippy::module_name_repetitions)]
pub use telegram::TelegramNotifier;

/// `DynNotifier` is a type alias for a [`Notifier`] shared between concurrent request handlers.
#[allow(clippy::module_name_repetitions)]
pub type DynNotifier = Arc<dyn Notifier + Send + Sync>;

/// An async trait describing one-shot delivery of formatted text to the configured chat.
#[async_trait::async_trait]
pub trait Notifier {
    /// Attempt delivery of `message` exactly once.
    ///
    /// A rejection from the messaging service is returned as [`Error::UpstreamDelivery`] carrying
    /// the service's status and description unchanged.
    async fn deliver(&self, message: &FormattedText) -> Result<(), Error>;
}
