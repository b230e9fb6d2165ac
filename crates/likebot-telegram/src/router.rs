use std::{net::SocketAddr, sync::Arc};

use teloxide::{
    dispatching::Dispatcher, dptree, error_handlers::LoggingErrorHandler, prelude::*,
    update_listeners::webhooks,
};

use url::Url;

use likebot_core::{
    config::{Config, WebhookConfig},
    dispatch::EventDispatcher,
    messaging::port::ReplySender,
    pool::SenderPool,
    store::CounterStore,
};

use crate::{handlers, TelegramSender};

pub struct AppState {
    pub dispatcher: EventDispatcher,
}

/// Build the intake and run it until the process is stopped.
///
/// The primary credential owns the update feed; replies for both event kinds
/// go through the round-robin pool built from the auxiliary credentials.
pub async fn run(cfg: Arc<Config>, store: Arc<dyn CounterStore>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!("authorized on @{}", me.username());
    }

    let pool = sender_pool(&cfg.sender_bot_tokens)?;
    tracing::info!(senders = pool.len(), "sender pool ready");

    let state = Arc::new(AppState {
        dispatcher: EventDispatcher::new(store, pool),
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_channel_post().endpoint(handlers::handle_channel_post));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![state])
        // Anything that is neither a callback nor a channel post is ignored.
        .default_handler(|_| async {})
        .build();

    match &cfg.webhook {
        Some(wh) => {
            let url = webhook_url(wh, &cfg.telegram_bot_token)?;
            let addr = SocketAddr::from(([0, 0, 0, 0], wh.port));
            tracing::info!(port = wh.port, "starting webhook intake");
            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url)).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("update listener error"),
                )
                .await;
        }
        None => {
            tracing::info!("starting long-poll intake");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}

fn sender_pool(tokens: &[String]) -> likebot_core::Result<SenderPool> {
    let senders: Vec<Arc<dyn ReplySender>> = tokens
        .iter()
        .map(|token| {
            Arc::new(TelegramSender::new(Bot::new(token.clone()))) as Arc<dyn ReplySender>
        })
        .collect();
    SenderPool::new(senders)
}

/// Public endpoint registered with the platform. The token-bearing path is
/// what authenticates inbound requests.
fn webhook_url(wh: &WebhookConfig, token: &str) -> likebot_core::Result<Url> {
    format!("https://{}:{}/{}", wh.domain, wh.port, token)
        .parse()
        .map_err(|e| likebot_core::Error::Config(format!("invalid webhook url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_url_embeds_the_token_path() {
        let wh = WebhookConfig {
            domain: "bot.example.org".to_string(),
            port: 8443,
        };
        let url = webhook_url(&wh, "123456:abcDEF").unwrap();
        assert_eq!(url.as_str(), "https://bot.example.org:8443/123456:abcDEF");
    }
}
