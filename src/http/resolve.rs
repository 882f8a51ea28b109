//! Maps a request target onto a file under the web root.
//!
//! Resolution runs in a fixed order: strip leading slashes, default an empty
//! name to `index.html`, check the extension against the allow-list, join onto
//! the root, and finally require an existing regular file. The extension check
//! comes before any filesystem access, so a disallowed extension is Forbidden
//! even when a matching file exists.

use std::path::{Path, PathBuf};

use crate::http::mime;

/// Served when the target names no file.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Extensions that may be served. Compared case-sensitively.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["html", "css", "js"];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("extension not allowed: {0}")]
    Forbidden(String),
    #[error("outside web root: {0}")]
    OutsideRoot(String),
    #[error("no such file: {0}")]
    NotFound(String),
}

/// A root-confined file that exists and may be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub extension: String,
}

impl ResolvedFile {
    pub fn content_type(&self) -> &'static str {
        mime::content_type(&self.extension)
    }
}

/// How a validated name is joined onto the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPolicy {
    /// Canonicalize and require the result to stay under the root.
    Strict,
    /// Plain join; `..` segments are followed as-is.
    Lax,
}

/// Relative file name for a target: leading `/` removed, empty becomes the
/// default document.
pub fn file_name(target: &str) -> &str {
    let name = target.trim_start_matches('/');
    if name.is_empty() { DEFAULT_DOCUMENT } else { name }
}

/// Everything after the last `.` of the name, if there is one.
pub fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

pub fn is_allowed(extension: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&extension)
}

/// Resolves `target` against `root`.
pub async fn resolve(
    root: &Path,
    target: &str,
    policy: PathPolicy,
) -> Result<ResolvedFile, ResolveError> {
    let name = file_name(target);

    let ext = match extension(name) {
        Some(ext) if is_allowed(ext) => ext.to_string(),
        _ => return Err(ResolveError::Forbidden(name.to_string())),
    };

    let candidate = root.join(name);

    let path = match policy {
        PathPolicy::Strict => confine(root, &candidate).await?,
        PathPolicy::Lax => candidate,
    };

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Ok(ResolvedFile {
            path,
            extension: ext,
        }),
        _ => Err(ResolveError::NotFound(name.to_string())),
    }
}

async fn confine(root: &Path, candidate: &Path) -> Result<PathBuf, ResolveError> {
    let not_found = || ResolveError::NotFound(candidate.display().to_string());

    // A missing root or candidate means there is nothing to serve.
    let root = tokio::fs::canonicalize(root).await.map_err(|_| not_found())?;
    let resolved = tokio::fs::canonicalize(candidate)
        .await
        .map_err(|_| not_found())?;

    if !resolved.starts_with(&root) {
        return Err(ResolveError::OutsideRoot(candidate.display().to_string()));
    }

    Ok(resolved)
}
