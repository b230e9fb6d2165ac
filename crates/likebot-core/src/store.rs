use async_trait::async_trait;

use crate::{domain::MessageId, Result};

/// Minimal view over the external key-to-integer increment service.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically increment `key` and return the new value (1 on first use).
    /// Never decreases; overflow policy belongs to the store.
    async fn increment(&self, key: &str) -> Result<i64>;
}

/// Store key for a message's like counter: the decimal message id, exactly.
///
/// Keyed by message id alone, so counts share one namespace across chats.
/// Existing entries live under these keys; the format must not change.
pub fn counter_key(message_id: MessageId) -> String {
    message_id.0.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_key_is_the_decimal_message_id() {
        assert_eq!(counter_key(MessageId(100)), "100");
        assert_eq!(counter_key(MessageId(1)), "1");
    }
}
