//! Process settings from the environment (and `.env`, loaded by the binary through dotenvy).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/biztime";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Missing keys fall back to defaults; present but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_or(&lookup, "BIND_ADDR", || {
            SocketAddr::from_str(DEFAULT_BIND_ADDR).map_err(|_| ConfigError::Invalid {
                var: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.into(),
            })
        })?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", || Ok(DEFAULT_MAX_CONNECTIONS))?;
        let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", || Ok(DEFAULT_BODY_LIMIT_BYTES))?;
        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            body_limit_bytes,
        })
    }
}

fn parse_or<F, T, D>(lookup: &F, var: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    D: FnOnce() -> Result<T, ConfigError>,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => default(),
    }
}
