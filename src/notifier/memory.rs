use crate::error::Error;
use crate::message::FormattedText;
use crate::notifier::Notifier;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Number of messages an [`InMemoryNotifier`] keeps unless told otherwise.
pub const DEFAULT_HISTORY: usize = 64;

/// A [`Notifier`] that keeps the most recent delivered messages in memory instead of sending them
/// anywhere. Older messages are dropped once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct InMemoryNotifier {
    delivered: Arc<RwLock<VecDeque<FormattedText>>>,
    capacity: usize,
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY)
    }
}

impl InMemoryNotifier {
    /// A notifier retaining at most `capacity` messages.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            delivered: Arc::default(),
            capacity,
        }
    }

    /// Retained messages, oldest first.
    pub async fn delivered(&self) -> Vec<FormattedText> {
        self.delivered.read().await.iter().cloned().collect()
    }
}

#[async_trait::async_trait]
impl Notifier for InMemoryNotifier {
    async fn deliver(&self, message: &FormattedText) -> Result<(), Error> {
        tracing::info!("dry run delivery:\n{}", message.text);
        if self.capacity == 0 {
            return Ok(());
        }
        let mut delivered = self.delivered.write().await;
        while delivered.len() >= self.capacity {
            delivered.pop_front();
        }
        delivered.push_back(message.clone());
        Ok(())
    }
}
