//! Notifier trait for sending chat messages

use async_trait::async_trait;

/// Trait for sending notifications
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Make one delivery attempt of `message` to the configured destination
    async fn notify(&self, message: &str) -> crate::Result<()>;
}

/// Result of a single delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed,
}

/// Attempt one delivery and absorb any failure into a logged [`Delivery::Failed`].
pub async fn deliver(notifier: &dyn Notifier, message: &str) -> Delivery {
    match notifier.notify(message).await {
        Ok(()) => {
            tracing::info!("Sent via '{}': {}", notifier.type_name(), message);
            Delivery::Sent
        }
        Err(e) => {
            tracing::error!(
                "Message via '{}' was not delivered: {}",
                notifier.type_name(),
                e
            );
            Delivery::Failed
        }
    }
}
