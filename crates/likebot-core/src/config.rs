use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed runtime configuration, read from the environment (with optional
/// `.env` file support).
#[derive(Clone, Debug)]
pub struct Config {
    /// Primary credential; owns the webhook / long-poll intake.
    pub telegram_bot_token: String,
    /// Ordered auxiliary credentials backing the sender pool. Emptiness is
    /// rejected where the pool is built, not here.
    pub sender_bot_tokens: Vec<String>,

    /// When set, run the webhook intake; otherwise fall back to long polling.
    pub webhook: Option<WebhookConfig>,

    pub redis: RedisConfig,
    /// Upper bound on any single counter-store call.
    pub store_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct WebhookConfig {
    /// Public hostname the platform calls back on.
    pub domain: String,
    /// Public and bind port.
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct RedisConfig {
    /// `host:port`.
    pub address: String,
    pub password: Option<String>,
    pub database: i64,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let sender_bot_tokens = parse_csv(env_str("SENDER_BOT_TOKENS"));

        let webhook = env_str("WEBHOOK_DOMAIN")
            .and_then(non_empty)
            .map(|domain| WebhookConfig {
                domain,
                port: env_u16("WEBHOOK_PORT").unwrap_or(8443),
            });

        let redis = RedisConfig {
            address: env_str("REDIS_ADDRESS")
                .and_then(non_empty)
                .unwrap_or_else(|| "localhost:6379".to_string()),
            password: env_str("REDIS_PASSWORD").and_then(non_empty),
            database: env_i64("REDIS_DATABASE").unwrap_or(0),
        };

        let store_timeout = Duration::from_millis(env_u64("STORE_TIMEOUT_MS").unwrap_or(3_000));

        Ok(Self {
            telegram_bot_token,
            sender_bot_tokens,
            webhook,
            redis,
            store_timeout,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_u16(key: &str) -> Option<u16> {
    env_str(key).and_then(|s| s.trim().parse::<u16>().ok())
}

fn env_i64(key: &str) -> Option<i64> {
    env_str(key).and_then(|s| s.trim().parse::<i64>().ok())
}

fn parse_csv(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_tokens_are_trimmed_and_empties_dropped() {
        let tokens = parse_csv(Some(" a:1 , b:2 ,, c:3 ".to_string()));
        assert_eq!(tokens, vec!["a:1", "b:2", "c:3"]);
    }

    #[test]
    fn missing_csv_is_an_empty_list() {
        assert!(parse_csv(None).is_empty());
    }

    #[test]
    fn blank_strings_are_not_values() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty("x".to_string()), Some("x".to_string()));
    }
}
