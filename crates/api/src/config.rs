//! Process configuration read from the environment.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{bail, Context};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which document store backs the API.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Process-local store (dev/test); data is lost on restart.
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Persistence was requested without a database URL.
    Unconfigured,
}

// Hand-written so the database URL (and its credentials) never reaches logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => f.write_str("InMemory"),
            Self::Postgres { max_connections, .. } => f
                .debug_struct("Postgres")
                .field("max_connections", max_connections)
                .finish_non_exhaustive(),
            Self::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub port: u16,
    pub store: StoreConfig,
    pub auto_seed: bool,
}

impl ApiConfig {
    /// Read `PORT`, `USE_PERSISTENT_STORES`, `DATABASE_URL`,
    /// `DATABASE_MAX_CONNECTIONS` and `AUTO_SEED`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {v:?}"))?,
            None => DEFAULT_PORT,
        };

        let use_persistent = match get("USE_PERSISTENT_STORES") {
            Some(v) => parse_bool("USE_PERSISTENT_STORES", &v)?,
            None => false,
        };

        let store = if !use_persistent {
            StoreConfig::InMemory
        } else if let Some(database_url) = get("DATABASE_URL") {
            let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                Some(v) => v.trim().parse::<u32>().with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {v:?}")
                })?,
                None => DEFAULT_MAX_CONNECTIONS,
            };
            if max_connections == 0 {
                bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
            }
            StoreConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StoreConfig::Unconfigured
        };

        let auto_seed = match get("AUTO_SEED") {
            Some(v) => parse_bool("AUTO_SEED", &v)?,
            None => true,
        };

        Ok(Self {
            port,
            store,
            auto_seed,
        })
    }

    /// All interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} must be a boolean, got {value:?}"),
    }
}
