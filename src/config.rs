use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const DEFAULT_STATIC_ROOT: &str = "public";
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_DRAIN_TIMEOUT: Duration = crate::server::pool::DEFAULT_DRAIN_TIMEOUT;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Directory request paths are appended to.
    pub static_root: String,
    /// Number of connection-handling workers.
    pub workers: usize,
    /// Grace period for in-flight connections on shutdown.
    pub drain_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            static_root: DEFAULT_STATIC_ROOT.to_string(),
            workers: DEFAULT_WORKERS,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}

impl Config {
    /// Reads `LISTEN`, `STATIC_ROOT`, `WORKERS` and `DRAIN_TIMEOUT_SECS`
    /// from the environment.
    pub fn load() -> Self {
        let defaults = Self::default();

        let listen_addr = std::env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let static_root = std::env::var("STATIC_ROOT").unwrap_or(defaults.static_root);
        let workers = parse_var::<usize>("WORKERS")
            .filter(|&n| n > 0)
            .unwrap_or(defaults.workers);
        let drain_timeout = parse_var::<u64>("DRAIN_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.drain_timeout);

        Self {
            listen_addr,
            static_root,
            workers,
            drain_timeout,
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid environment value");
            None
        }
    }
}
