//! Process configuration, read once at startup from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DELETION_SECRET` | required |
//! | `BIND_ADDR` | `0.0.0.0:8080` |
//! | `QUERY_PAGE_SIZE` | `300` |
//! | `STORE_PAGE_CAP` | `500` |
//! | `STORE_MAX_BATCH_WRITES` | `500` |
//! | `SEED_FILE` | unset |

use crate::document_actor::DocumentStoreLimits;
use crate::orchestrator::DEFAULT_QUERY_PAGE_SIZE;
use crate::runtime::env::VarNameErr;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

crate::env_var!(
    #[derive(Clone)]
    pub struct DeletionSecret;
);

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Missing(#[from] VarNameErr),

    #[error("Invalid value for {var_name}: {value:?}")]
    Invalid { var_name: &'static str, value: String },
}

/// Everything `main` needs to start serving.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub secret: DeletionSecret,
    pub query_page_size: usize,
    pub store_limits: DocumentStoreLimits,
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = DeletionSecret::new()?;
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                var_name: DeletionSecret::VAR_NAME,
                value: String::new(),
            });
        }

        let defaults = DocumentStoreLimits::default();
        Ok(Self {
            bind_addr: setting("BIND_ADDR", DEFAULT_BIND_ADDR)?,
            secret,
            query_page_size: count("QUERY_PAGE_SIZE", DEFAULT_QUERY_PAGE_SIZE)?,
            store_limits: DocumentStoreLimits {
                page_cap: count("STORE_PAGE_CAP", defaults.page_cap)?,
                max_batch_writes: count("STORE_MAX_BATCH_WRITES", defaults.max_batch_writes)?,
            },
            seed_file: optional("SEED_FILE")?.map(PathBuf::from),
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("secret", &"<redacted>")
            .field("query_page_size", &self.query_page_size)
            .field("store_limits", &self.store_limits)
            .field("seed_file", &self.seed_file)
            .finish()
    }
}

fn optional(var_name: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var_name) {
        Ok(raw) => Ok(Some(raw)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(VarNameErr { var_name, err }.into()),
    }
}

fn setting<T: FromStr>(var_name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(var_name)? {
        Some(raw) => parse_setting(var_name, &raw),
        None => Ok(default),
    }
}

/// A setting that must be a positive integer.
fn count(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
    let value = setting(var_name, default)?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            var_name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn parse_setting<T: FromStr>(var_name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var_name,
        value: raw.to_string(),
    })
}
