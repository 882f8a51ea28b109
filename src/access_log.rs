//! Append-only request log.
//!
//! One line per received request line:
//! `<timestamp> - <client ip> - <raw request line>`.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct AccessLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AccessLog {
    /// Opens (creating if needed) the log file in append mode.
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("opening request log {}", path.display()))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one entry. Failures are reported and otherwise ignored.
    pub async fn record(&self, client: IpAddr, request_line: &str) {
        let entry = format_entry(
            &chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            client,
            request_line,
        );

        let mut file = self.file.lock().await;
        if let Err(e) = write_entry(&mut file, &entry).await {
            tracing::warn!(path = %self.path.display(), "Failed to write request log: {}", e);
        }
    }
}

async fn write_entry(file: &mut File, entry: &str) -> std::io::Result<()> {
    file.write_all(entry.as_bytes()).await?;
    file.flush().await
}

/// Builds a log line, terminator included. Line breaks in the request line
/// are dropped so one entry is always one line.
pub fn format_entry(timestamp: &str, client: IpAddr, request_line: &str) -> String {
    let line: String = request_line
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect();

    format!("{} - {} - {}\n", timestamp, client, line)
}
