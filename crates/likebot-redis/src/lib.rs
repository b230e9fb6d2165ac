//! Redis adapter for the counter-store port.
//!
//! One `INCR` per counted click. The connection is established lazily and
//! dropped on failure, so the next call reconnects and an outage at startup
//! only degrades counts instead of failing boot.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands};
use tokio::sync::Mutex;
use tokio::time::timeout;

use likebot_core::{config::RedisConfig, errors::Error, store::CounterStore, Result};

pub struct RedisCounterStore {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
    timeout: Duration,
}

impl RedisCounterStore {
    /// Validate the configuration and build a client. No connection is made
    /// here.
    pub fn connect(cfg: &RedisConfig, call_timeout: Duration) -> Result<Self> {
        let (host, port) = parse_addr(&cfg.address)?;
        let info = redis::ConnectionInfo {
            addr: redis::ConnectionAddr::Tcp(host, port),
            redis: redis::RedisConnectionInfo {
                db: cfg.database,
                username: None,
                password: cfg.password.clone(),
                ..Default::default()
            },
        };
        let client = redis::Client::open(info)
            .map_err(|e| Error::Config(format!("invalid redis configuration: {e}")))?;

        Ok(Self {
            client,
            conn: Mutex::new(None),
            timeout: call_timeout,
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }
        let conn = timeout(self.timeout, self.client.get_multiplexed_async_connection())
            .await
            .map_err(|_| Error::StoreUnavailable("connect timed out".to_string()))?
            .map_err(map_redis_err)?;
        *slot = Some(conn.clone());
        Ok(conn)
    }

    async fn drop_connection(&self) {
        *self.conn.lock().await = None;
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        match timeout(self.timeout, conn.incr(key, 1)).await {
            Ok(Ok(count)) => Ok(count),
            Ok(Err(e)) => {
                self.drop_connection().await;
                Err(map_redis_err(e))
            }
            Err(_) => {
                self.drop_connection().await;
                Err(Error::StoreUnavailable("incr timed out".to_string()))
            }
        }
    }
}

fn map_redis_err(e: redis::RedisError) -> Error {
    Error::StoreUnavailable(e.to_string())
}

fn parse_addr(address: &str) -> Result<(String, u16)> {
    match address.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("invalid redis address: {address}")))?;
            Ok((host.to_string(), port))
        }
        None => Ok((address.to_string(), 6379)),
    }
}
