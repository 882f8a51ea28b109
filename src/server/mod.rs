//! Accept loop, worker pool and the state shared between connections.

pub mod listener;
pub mod pool;

use crate::access_log::AccessLog;
use crate::config::Config;

/// Read-only configuration plus the shared request log.
pub struct ServerContext {
    pub config: Config,
    pub access_log: AccessLog,
}

impl ServerContext {
    pub fn new(config: Config, access_log: AccessLog) -> Self {
        Self { config, access_log }
    }

    /// Opens the request log named in `config`.
    pub async fn open(config: Config) -> anyhow::Result<Self> {
        let access_log = AccessLog::open(&config.log_file).await?;
        Ok(Self::new(config, access_log))
    }
}
