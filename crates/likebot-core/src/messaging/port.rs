use async_trait::async_trait;

use crate::{domain::MessageRef, messaging::types::InlineKeyboard, Result};

/// One authenticated outbound client, able to attach an updated keyboard to
/// an existing message.
///
/// The pool hands these out round-robin; implementations must be safe to
/// call from many dispatcher invocations at once.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn edit_reply_markup(&self, msg: MessageRef, keyboard: InlineKeyboard) -> Result<()>;
}
