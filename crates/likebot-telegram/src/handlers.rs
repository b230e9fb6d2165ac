//! Update handlers: map recognized Telegram updates onto inbound events and
//! hand them to the dispatcher.
//!
//! Handlers always return success; downstream failures are settled inside
//! the dispatcher, and the platform never retries a delivered update.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use likebot_core::{
    domain::{ChatId, MessageId, MessageRef},
    events::InboundEvent,
};

use crate::router::AppState;

fn message_ref(msg: &Message) -> MessageRef {
    MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    }
}

/// A press on the like button. Callback queries without an attached message
/// carry nothing to edit and are dropped.
pub async fn handle_callback(q: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(msg) = q.message.as_ref() {
        state
            .dispatcher
            .dispatch(InboundEvent::CallbackAction(message_ref(msg)))
            .await;
    }
    Ok(())
}

/// A new channel post: attach a zeroed like button.
pub async fn handle_channel_post(post: Message, state: Arc<AppState>) -> ResponseResult<()> {
    state
        .dispatcher
        .dispatch(InboundEvent::NewPost(message_ref(&post)))
        .await;
    Ok(())
}
