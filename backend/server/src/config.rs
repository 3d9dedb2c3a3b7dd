use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const PORT: &str = "PORT";
pub const REDIS_URL: &str = "REDIS_URL";
pub const CONTACT_STORE: &str = "CONTACT_STORE";
pub const CONTACT_KEY_PREFIX: &str = "CONTACT_KEY_PREFIX";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Redis,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreKind::Redis),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("expected `redis` or `memory`, got `{other}`")),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub store: StoreKind,
    pub key_prefix: String,
}

impl Config {
    /// `REDIS_URL` falls back to a Docker secret of the same name.
    /// Other keys come from the environment only.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env_or_secret(key, var, read_secret))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, PORT, "5000")?,
            redis_url: try_load(&lookup, REDIS_URL, "redis://127.0.0.1:6379")?,
            store: try_load(&lookup, CONTACT_STORE, "redis")?,
            key_prefix: try_load(&lookup, CONTACT_KEY_PREFIX, "contact")?,
        })
    }
}

fn env_or_secret<E, S>(key: &str, env: E, secret: S) -> Option<String>
where
    E: Fn(&str) -> Option<String>,
    S: Fn(&str) -> Option<String>,
{
    env(key).or_else(|| if key == REDIS_URL { secret(key) } else { None })
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");

        ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path).map(|s| s.trim().to_string()).ok()
}
