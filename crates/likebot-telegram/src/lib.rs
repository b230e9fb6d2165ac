//! Telegram adapter (teloxide).
//!
//! Implements the `likebot-core` reply-sender port over the Telegram Bot API
//! and hosts the webhook / long-poll intake.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use likebot_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::ReplySender, types::InlineKeyboard},
    Result,
};

/// One authenticated outbound client backed by a teloxide `Bot`.
#[derive(Clone)]
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn tg_markup(keyboard: InlineKeyboard) -> InlineKeyboardMarkup {
        let row: Vec<InlineKeyboardButton> = keyboard
            .buttons
            .into_iter()
            .map(|b| InlineKeyboardButton::callback(b.label, b.callback_data))
            .collect();
        InlineKeyboardMarkup::new(vec![row])
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::SendFailure(format!("telegram error: {e}"))
    }

    /// One bounded retry on Telegram flood control; everything else fails
    /// through to the dispatcher's logging.
    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl ReplySender for TelegramSender {
    async fn edit_reply_markup(&self, msg: MessageRef, keyboard: InlineKeyboard) -> Result<()> {
        let markup = Self::tg_markup(keyboard);
        self.with_retry(|| {
            self.bot
                .edit_message_reply_markup(
                    Self::tg_chat(msg.chat_id),
                    Self::tg_msg_id(msg.message_id),
                )
                .reply_markup(markup.clone())
        })
        .await?;
        Ok(())
    }
}
