use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Proxy, StatusCode};
use serde::Deserialize;

/// Callback type for reporting download progress.
/// Arguments: source URL, bytes downloaded, total bytes, MiB/s, is_complete
pub type ProgressFn = Arc<dyn Fn(&str, u64, u64, f64, bool) + Send + Sync>;

/// Release metadata as returned by the GitHub releases API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    /// A release document without an `assets` array deserializes to an empty list.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A downloadable artifact attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

/// Outcome of a release lookup, dispatched on the API response status.
#[derive(Debug)]
pub enum ReleaseLookup {
    /// The endpoint answered with a success status and a parseable body.
    Found(Release),
    /// HTTP 404: no release exists at the queried endpoint.
    NotFound,
    /// Any other non-success status, with the raw response body.
    Failed { status: StatusCode, body: String },
}

/// Queries release metadata and downloads release assets.
pub struct Downloader {
    /// GitHub API URL the release lookup hits (pre-built from `repo`).
    pub api_url: String,
    /// GitHub repository in `owner/repo` format.
    pub repo: String,
    /// Optional HTTP proxy URL.
    pub proxy: Option<String>,
    /// Optional progress callback.
    pub progress: Option<ProgressFn>,
}

/// API endpoint for the latest release of `repo`.
pub fn latest_release_url(repo: &str) -> String {
    format!("https://api.github.com/repos/{repo}/releases/latest")
}

/// API endpoint for the release of `repo` tagged `tag`.
pub fn tagged_release_url(repo: &str, tag: &str) -> String {
    format!("https://api.github.com/repos/{repo}/releases/tags/{tag}")
}

impl Downloader {
    /// Create a downloader targeting the latest release of `repo`.
    pub fn new(repo: &str) -> Self {
        Self {
            api_url: latest_release_url(repo),
            repo: repo.to_owned(),
            proxy: None,
            progress: None,
        }
    }

    /// Create a downloader with explicit configuration.
    pub fn with_config(repo: &str, proxy: Option<String>, progress: Option<ProgressFn>) -> Self {
        Self {
            api_url: latest_release_url(repo),
            repo: repo.to_owned(),
            proxy,
            progress,
        }
    }

    /// Build an HTTP client, optionally with proxy support.
    fn build_client(&self) -> Result<Client, reqwest::Error> {
        let mut builder =
            Client::builder().user_agent(concat!("reportfetch/", env!("CARGO_PKG_VERSION")));
        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(Proxy::all(proxy_url)?);
        }
        builder.build()
    }

    /// Fetch the release document from `api_url` and dispatch on status.
    ///
    /// A 404 and any other non-success status are reported as data, not as
    /// errors; callers decide how soft those outcomes are. Transport
    /// failures and unparseable success bodies are errors.
    pub async fn latest_release(&self) -> Result<ReleaseLookup, String> {
        let client = self.build_client().map_err(|e| e.to_string())?;
        let resp = client
            .get(&self.api_url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(ReleaseLookup::NotFound);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Ok(ReleaseLookup::Failed { status, body });
        }

        let body = resp.text().await.map_err(|e| e.to_string())?;
        let release = serde_json::from_str(&body)
            .map_err(|e| format!("error parsing release response: {e}"))?;
        Ok(ReleaseLookup::Found(release))
    }

    /// Download `url` fully into memory and return the bytes.
    ///
    /// The body is accumulated chunk by chunk so progress can be reported
    /// while it arrives; nothing touches disk here.
    pub async fn download_bytes(&self, url: &str) -> Result<bytes::Bytes, String> {
        use futures_util::StreamExt;

        let client = self.build_client().map_err(|e| e.to_string())?;
        let resp = client.get(url).send().await.map_err(|e| e.to_string())?;
        if !resp.status().is_success() {
            return Err(format!("download failed with status {}", resp.status()));
        }

        let total = resp.content_length().unwrap_or(0);
        let start = Instant::now();
        let mut downloaded: u64 = 0;
        let mut chunks: Vec<bytes::Bytes> = Vec::new();
        let mut stream = resp.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| e.to_string())?;
            downloaded += chunk.len() as u64;
            // Report at most once every ~8 MiB to keep the console readable.
            let crossed_boundary = downloaded % (8 * 1024 * 1024) < chunk.len() as u64;
            chunks.push(chunk);
            if crossed_boundary {
                self.report_progress(url, downloaded, total, start, false);
            }
        }
        self.report_progress(url, downloaded, total, start, true);

        Ok(chunks.into_iter().flatten().collect())
    }

    fn report_progress(
        &self,
        src: &str,
        downloaded: u64,
        total: u64,
        start: Instant,
        complete: bool,
    ) {
        if let Some(progress) = &self.progress {
            let elapsed = start.elapsed().as_secs_f64();
            let mib_per_sec = if elapsed > 0.0 {
                (downloaded as f64) / (1024.0 * 1024.0) / elapsed
            } else {
                0.0
            };
            progress(src, downloaded, total, mib_per_sec, complete);
        }
    }
}
