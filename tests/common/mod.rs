#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use webserver::access_log::AccessLog;
use webserver::config::Config;
use webserver::server::ServerContext;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Scratch directory holding a `webroot/` and a request log, removed on drop.
pub struct TempSite {
    pub dir: PathBuf,
}

impl TempSite {
    pub fn new(tag: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "webserver-{}-{}-{}",
            tag,
            std::process::id(),
            NEXT_ID.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(dir.join("webroot")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.join("webroot")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join("server_log.txt")
    }

    /// Writes a file relative to the web root.
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// Writes a file next to (outside of) the web root.
    pub fn write_outside(&self, name: &str, contents: impl AsRef<[u8]>) {
        std::fs::write(self.dir.join(name), contents).unwrap();
    }

    pub fn config(&self) -> Config {
        Config {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            root_dir: self.root(),
            log_file: self.log_path(),
            ..Config::default()
        }
    }

    pub async fn context(&self) -> Arc<ServerContext> {
        self.context_with(self.config()).await
    }

    pub async fn context_with(&self, config: Config) -> Arc<ServerContext> {
        let log = AccessLog::open(&config.log_file).await.unwrap();
        Arc::new(ServerContext::new(config, log))
    }

    pub fn log_lines(&self) -> Vec<String> {
        read_lines(&self.log_path())
    }
}

impl Drop for TempSite {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn peer() -> SocketAddr {
    "127.0.0.1:50000".parse().unwrap()
}

/// A response split into status line, headers and body.
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn parse(bytes: &[u8]) -> Self {
        let end = bytes
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("no header terminator");
        let head = std::str::from_utf8(&bytes[..end]).unwrap();
        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap().to_string();
        let headers = lines
            .map(|line| {
                let (k, v) = line.split_once(": ").unwrap();
                (k.to_string(), v.to_string())
            })
            .collect();

        Self {
            status_line,
            headers,
            body: bytes[end + 4..].to_vec(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
