use std::sync::Arc;

use crate::{
    domain::MessageRef,
    events::InboundEvent,
    messaging::types::InlineKeyboard,
    pool::SenderPool,
    store::{counter_key, CounterStore},
};

/// Turns each inbound event into exactly one best-effort outbound reply.
///
/// Holds no state beyond its two collaborators, so concurrent invocations
/// are independent. Store and send failures are logged and swallowed here;
/// nothing propagates back to the intake.
pub struct EventDispatcher {
    store: Arc<dyn CounterStore>,
    pool: SenderPool,
}

impl EventDispatcher {
    pub fn new(store: Arc<dyn CounterStore>, pool: SenderPool) -> Self {
        Self { store, pool }
    }

    /// Process one event to completion.
    pub async fn dispatch(&self, event: InboundEvent) {
        match event {
            InboundEvent::CallbackAction(msg) => {
                let count = self.bump_likes(msg).await;
                self.reply(msg, count).await;
            }
            // A fresh post has no counter entry yet; render zero without
            // touching the store.
            InboundEvent::NewPost(msg) => self.reply(msg, 0).await,
        }
    }

    /// Count the click. A store outage degrades to a rendered 0 rather than
    /// dropping the event.
    async fn bump_likes(&self, msg: MessageRef) -> i64 {
        let key = counter_key(msg.message_id);
        match self.store.increment(&key).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(key = %key, "like counter increment failed: {e}");
                0
            }
        }
    }

    async fn reply(&self, msg: MessageRef, count: i64) {
        let sender = self.pool.next();
        if let Err(e) = sender
            .edit_reply_markup(msg, InlineKeyboard::like_button(count))
            .await
        {
            tracing::warn!(
                chat_id = msg.chat_id.0,
                message_id = msg.message_id.0,
                "reply markup edit failed: {e}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::{ChatId, MessageId};
    use crate::errors::Error;
    use crate::messaging::port::ReplySender;

    #[derive(Default)]
    struct FakeStore {
        counts: Mutex<HashMap<String, i64>>,
        calls: Mutex<Vec<String>>,
        down: bool,
    }

    #[async_trait]
    impl CounterStore for FakeStore {
        async fn increment(&self, key: &str) -> crate::Result<i64> {
            self.calls.lock().unwrap().push(key.to_string());
            if self.down {
                return Err(Error::StoreUnavailable("connection refused".to_string()));
            }
            let mut counts = self.counts.lock().unwrap();
            let slot = counts.entry(key.to_string()).or_insert(0);
            *slot += 1;
            Ok(*slot)
        }
    }

    /// One recorded reply: pool index of the sender, target, label, payload.
    type SentReply = (usize, MessageRef, String, String);

    struct FakeSender {
        index: usize,
        fail: bool,
        log: Arc<Mutex<Vec<SentReply>>>,
    }

    #[async_trait]
    impl ReplySender for FakeSender {
        async fn edit_reply_markup(
            &self,
            msg: MessageRef,
            keyboard: InlineKeyboard,
        ) -> crate::Result<()> {
            let button = &keyboard.buttons[0];
            self.log.lock().unwrap().push((
                self.index,
                msg,
                button.label.clone(),
                button.callback_data.clone(),
            ));
            if self.fail {
                return Err(Error::SendFailure("bad gateway".to_string()));
            }
            Ok(())
        }
    }

    fn fixture(
        pool_size: usize,
        store_down: bool,
        send_fails: bool,
    ) -> (Arc<FakeStore>, Arc<Mutex<Vec<SentReply>>>, EventDispatcher) {
        let store = Arc::new(FakeStore {
            down: store_down,
            ..Default::default()
        });
        let log = Arc::new(Mutex::new(Vec::new()));
        let senders: Vec<Arc<dyn ReplySender>> = (0..pool_size)
            .map(|index| {
                Arc::new(FakeSender {
                    index,
                    fail: send_fails,
                    log: Arc::clone(&log),
                }) as Arc<dyn ReplySender>
            })
            .collect();
        let dispatcher =
            EventDispatcher::new(store.clone(), SenderPool::new(senders).unwrap());
        (store, log, dispatcher)
    }

    fn at(chat: i64, message: i32) -> MessageRef {
        MessageRef {
            chat_id: ChatId(chat),
            message_id: MessageId(message),
        }
    }

    #[tokio::test]
    async fn callbacks_count_up_per_message() {
        let (_store, log, dispatcher) = fixture(1, false, false);

        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(1, 100)))
            .await;
        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(7, 555)))
            .await;
        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(1, 100)))
            .await;
        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(1, 100)))
            .await;

        let labels: Vec<String> = log.lock().unwrap().iter().map(|r| r.2.clone()).collect();
        assert_eq!(labels, vec!["1 😂", "1 😂", "2 😂", "3 😂"]);
    }

    #[tokio::test]
    async fn new_post_renders_zero_without_touching_the_store() {
        let (store, log, dispatcher) = fixture(1, false, false);

        dispatcher.dispatch(InboundEvent::NewPost(at(1, 42))).await;

        assert!(store.calls.lock().unwrap().is_empty());
        let sent = log.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].2, "0 😂");
        assert_eq!(sent[0].3, "0");
    }

    #[tokio::test]
    async fn store_outage_degrades_to_zero_but_still_replies() {
        let (store, log, dispatcher) = fixture(1, true, false);

        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(1, 100)))
            .await;

        assert_eq!(store.calls.lock().unwrap().len(), 1);
        let sent = log.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].2, "0 😂");
    }

    #[tokio::test]
    async fn send_failures_are_swallowed() {
        let (_store, log, dispatcher) = fixture(2, false, true);

        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(1, 100)))
            .await;
        dispatcher.dispatch(InboundEvent::NewPost(at(1, 101))).await;

        // Both events were processed; neither failure escaped dispatch.
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn replies_rotate_through_the_pool() {
        let (_store, log, dispatcher) = fixture(3, false, false);

        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(1, 100)))
            .await;
        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(1, 100)))
            .await;
        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(2, 200)))
            .await;
        dispatcher.dispatch(InboundEvent::NewPost(at(2, 201))).await;

        let sent = log.lock().unwrap();
        let payloads: Vec<&str> = sent.iter().map(|r| r.3.as_str()).collect();
        let senders: Vec<usize> = sent.iter().map(|r| r.0).collect();
        // Counts per message, and both event kinds drawing from one rotation.
        assert_eq!(payloads, vec!["1", "2", "1", "0"]);
        assert_eq!(senders, vec![1, 2, 0, 1]);
    }

    #[tokio::test]
    async fn counter_keys_are_decimal_message_ids() {
        let (store, _log, dispatcher) = fixture(1, false, false);

        dispatcher
            .dispatch(InboundEvent::CallbackAction(at(5, 1234)))
            .await;

        assert_eq!(store.calls.lock().unwrap().as_slice(), ["1234".to_string()]);
    }
}
