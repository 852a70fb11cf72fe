//! Document acquisition from local paths or remote URLs.

use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::error::{GenError, Result};
use crate::options::Credentials;

/// Name used for the operations file when the locator has no usable stem.
pub const FALLBACK_BASE_NAME: &str = "OutputClass";

/// Where a document lives, decided by the locator's scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Fetched over HTTP(S).
    Remote(Url),
    /// Read from the file system.
    Local(PathBuf),
}

impl Locator {
    /// Classify a locator string. Only `http`/`https` are fetched remotely;
    /// `file://` URLs and everything else (including Windows drive paths)
    /// are read from disk.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Locator::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Locator::Local(path),
                Err(()) => Locator::Local(PathBuf::from(raw)),
            },
            _ => Locator::Local(PathBuf::from(raw)),
        }
    }

    /// File stem of the last path segment, e.g. `pets` for
    /// `https://host/api/pets.json`.
    pub fn base_name(&self) -> String {
        let stem = match self {
            Locator::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .and_then(|segment| {
                    Path::new(segment)
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                }),
            Locator::Local(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned()),
        };

        stem.filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| FALLBACK_BASE_NAME.to_string())
    }
}

/// Fetch the raw text of a document. No retries: any failure is returned as
/// [`GenError::Transport`].
pub async fn load_document(raw_locator: &str, credentials: Option<&Credentials>) -> Result<String> {
    let text = match Locator::parse(raw_locator) {
        Locator::Remote(url) => fetch_remote(url, credentials).await,
        Locator::Local(path) => read_local(&path).await,
    }
    .map_err(|message| GenError::Transport {
        locator: raw_locator.to_string(),
        message,
    })?;

    debug!(locator = %raw_locator, bytes = text.len(), "Loaded document.");
    Ok(text)
}

async fn fetch_remote(
    url: Url,
    credentials: Option<&Credentials>,
) -> std::result::Result<String, String> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|err| format!("Failed to build HTTP client: {err}"))?;

    let mut request = client.get(url.clone());
    if let Some(creds) = credentials {
        debug!(%url, username = %creds.username, "Attaching basic auth credentials.");
        request = request.basic_auth(&creds.username, Some(&creds.password));
    }

    debug!(%url, "Requesting document.");
    let response = request
        .send()
        .await
        .map_err(|err| format!("Request failed: {err}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("Server responded with {status}"));
    }

    response
        .text()
        .await
        .map_err(|err| format!("Failed to read response body: {err}"))
}

async fn read_local(path: &Path) -> std::result::Result<String, String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("Failed to read {}: {err}", path.display()))
}
