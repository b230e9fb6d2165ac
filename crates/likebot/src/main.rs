use std::sync::Arc;

use likebot_core::{config::Config, store::CounterStore};
use likebot_redis::RedisCounterStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    likebot_core::logging::init("likebot")?;

    let cfg = Arc::new(Config::load()?);
    let store: Arc<dyn CounterStore> =
        Arc::new(RedisCounterStore::connect(&cfg.redis, cfg.store_timeout)?);

    likebot_telegram::router::run(cfg, store).await
}
