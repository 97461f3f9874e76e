//! Server settings read from the environment.
//!
//! | Variable                | Default     |
//! |-------------------------|-------------|
//! | `DWH_HELPER_HOST`       | `127.0.0.1` |
//! | `DWH_HELPER_PORT`       | `8080`      |
//! | `DWH_HELPER_JSON_LIMIT` | `1048576`   |
//! | `DWH_HELPER_SESSION_TTL_SECS` | `3600` |
//! | `DWH_HELPER_MAX_SESSIONS` | `1000`    |

use std::io;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
    /// Sessions untouched for longer than this are discarded.
    pub session_ttl: Duration,
    /// Upper bound on live sessions; the least recently used one goes first.
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            json_limit: DEFAULT_JSON_LIMIT,
            session_ttl: DEFAULT_SESSION_TTL,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; unset variables keep their default.
    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ttl_secs = parse_var(
            &lookup,
            "DWH_HELPER_SESSION_TTL_SECS",
            defaults.session_ttl.as_secs(),
        )?;
        let max_sessions = parse_var(&lookup, "DWH_HELPER_MAX_SESSIONS", defaults.max_sessions)?;
        if ttl_secs == 0 || max_sessions == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "DWH_HELPER_SESSION_TTL_SECS and DWH_HELPER_MAX_SESSIONS must be positive",
            ));
        }

        Ok(Self {
            host: lookup("DWH_HELPER_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "DWH_HELPER_PORT", defaults.port)?,
            json_limit: parse_var(&lookup, "DWH_HELPER_JSON_LIMIT", defaults.json_limit)?,
            session_ttl: Duration::from_secs(ttl_secs),
            max_sessions,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> io::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid {}={:?}: {}", name, raw, e),
            )
        }),
        None => Ok(default),
    }
}
