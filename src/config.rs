use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::http::resolve::PathPolicy;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ROOT: &str = "webroot";
pub const DEFAULT_LOG_FILE: &str = "server_log.txt";
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_LINE_LEN: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub root_dir: PathBuf,
    pub log_file: PathBuf,
    /// Number of connections handled at once.
    pub workers: usize,
    /// How long to wait for the request line. `None` waits forever.
    pub read_timeout: Option<Duration>,
    /// How long sending the response may take. `None` waits forever.
    pub write_timeout: Option<Duration>,
    /// Longest request line accepted, in bytes, not counting the final `\n`.
    pub max_line_len: usize,
    /// Confine resolved paths to the root (canonicalize and prefix check).
    pub strict_paths: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            root_dir: PathBuf::from(DEFAULT_ROOT),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            workers: DEFAULT_WORKERS,
            read_timeout: Some(Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS)),
            write_timeout: Some(Duration::from_secs(DEFAULT_WRITE_TIMEOUT_SECS)),
            max_line_len: DEFAULT_MAX_LINE_LEN,
            strict_paths: true,
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key/value source, falling back to
    /// defaults for missing keys.
    ///
    /// Recognised keys: `LISTEN`, `WEBROOT`, `LOG_FILE`, `WORKERS`,
    /// `READ_TIMEOUT_SECS` and `WRITE_TIMEOUT_SECS` (0 disables the
    /// timeout), `MAX_LINE_LEN`,
    /// `STRICT_PATHS`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(addr) = lookup("LISTEN") {
            cfg.listen_addr = parse_var("LISTEN", &addr)?;
        }
        if let Some(root) = lookup("WEBROOT") {
            cfg.root_dir = PathBuf::from(root);
        }
        if let Some(log) = lookup("LOG_FILE") {
            cfg.log_file = PathBuf::from(log);
        }
        if let Some(workers) = lookup("WORKERS") {
            cfg.workers = parse_var("WORKERS", &workers)?;
            if cfg.workers == 0 {
                bail!("WORKERS must be at least 1");
            }
        }
        if let Some(secs) = lookup("READ_TIMEOUT_SECS") {
            let secs: u64 = parse_var("READ_TIMEOUT_SECS", &secs)?;
            cfg.read_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(secs) = lookup("WRITE_TIMEOUT_SECS") {
            let secs: u64 = parse_var("WRITE_TIMEOUT_SECS", &secs)?;
            cfg.write_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(len) = lookup("MAX_LINE_LEN") {
            cfg.max_line_len = parse_var("MAX_LINE_LEN", &len)?;
            if cfg.max_line_len == 0 {
                bail!("MAX_LINE_LEN must be at least 1");
            }
        }
        if let Some(strict) = lookup("STRICT_PATHS") {
            cfg.strict_paths = parse_flag("STRICT_PATHS", &strict)?;
        }

        Ok(cfg)
    }

    pub fn path_policy(&self) -> PathPolicy {
        if self.strict_paths {
            PathPolicy::Strict
        } else {
            PathPolicy::Lax
        }
    }
}

fn parse_var<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid {}: {:?}", key, value))
}

fn parse_flag(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("invalid {}: {:?}", key, value),
    }
}
