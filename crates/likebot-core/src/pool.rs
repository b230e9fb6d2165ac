use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::{errors::Error, messaging::port::ReplySender, Result};

/// Fixed set of outbound senders sharing a round-robin cursor.
///
/// The member list is immutable after construction; the cursor is the only
/// mutation point. A sender that fails outbound calls stays in rotation;
/// failure handling belongs to the dispatcher, not here.
pub struct SenderPool {
    senders: Vec<Arc<dyn ReplySender>>,
    cursor: AtomicU64,
}

impl std::fmt::Debug for SenderPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderPool")
            .field("senders", &self.senders.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl SenderPool {
    /// Fails with `Error::Config` on an empty credential list.
    pub fn new(senders: Vec<Arc<dyn ReplySender>>) -> Result<Self> {
        if senders.is_empty() {
            return Err(Error::Config(
                "sender pool requires at least one credential".to_string(),
            ));
        }
        Ok(Self {
            senders,
            cursor: AtomicU64::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    /// Next sender in rotation.
    ///
    /// The cursor advances atomically before the read, so the first call
    /// serves index 1 (the second configured credential, wrapping to 0 on a
    /// single-member pool) and every window of `len()` calls serves each
    /// member exactly once, concurrent callers included.
    pub fn next(&self) -> Arc<dyn ReplySender> {
        let step = self.cursor.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        let idx = (step % self.senders.len() as u64) as usize;
        Arc::clone(&self.senders[idx])
    }
}
