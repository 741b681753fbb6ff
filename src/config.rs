//! Configuration management for Margin Server

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upper bounds on the batches a single request may carry
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_feed_items: usize,
    pub max_reply_batch: usize,
    /// Deepest nesting level of a returned reply tree
    pub max_reply_depth: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            limits: LimitsConfig {
                max_feed_items: 500,
                max_reply_batch: 2000,
                max_reply_depth: 32,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
            },
            limits: LimitsConfig {
                max_feed_items: parse_var("MAX_FEED_ITEMS", defaults.limits.max_feed_items)?,
                max_reply_batch: parse_var("MAX_REPLY_BATCH", defaults.limits.max_reply_batch)?,
                max_reply_depth: parse_var("MAX_REPLY_DEPTH", defaults.limits.max_reply_depth)?,
            },
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|_| ConfigError::Invalid { key, value })
        }
        Err(_) => Ok(default),
    }
}
