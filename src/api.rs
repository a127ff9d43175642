use crate::downloader::{tagged_release_url, Downloader, ProgressFn};
use crate::progress::default_progress_fn;
use crate::report::{FetchOutcome, ReportFetcher};

// ──────────────────────────────────────────────────────────────────────────────
// Api
// ──────────────────────────────────────────────────────────────────────────────

/// Top-level entry-point with a chainable builder API.
///
/// # Example
/// ```rust,no_run
/// use reportfetch::Api;
///
/// #[tokio::main]
/// async fn main() {
///     Api::new()
///         .set_output_dir("docs")
///         .repo("monarch-initiative/omim-ingest")
///         .latest()
///         .fetch_reports("report.tsv")
///         .await
///         .unwrap();
/// }
/// ```
pub struct Api {
    output_dir: String,
    proxy: Option<String>,
    progress: Option<ProgressFn>,
}

impl Api {
    /// Create a new `Api` with sensible defaults: output into the current
    /// directory, no proxy, progress printed to stdout.
    pub fn new() -> Self {
        Self {
            output_dir: ".".to_owned(),
            proxy: None,
            progress: Some(default_progress_fn()),
        }
    }

    /// Set the directory report files are written into (builder).
    pub fn set_output_dir(mut self, dir: &str) -> Self {
        self.output_dir = dir.to_owned();
        self
    }

    /// Override the progress callback (builder).
    pub fn set_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Disable progress output (builder).
    pub fn no_progress(mut self) -> Self {
        self.progress = None;
        self
    }

    /// Set an explicit HTTP/HTTPS proxy URL (builder).
    pub fn set_proxy(mut self, proxy: &str) -> Self {
        self.proxy = Some(proxy.to_owned());
        self
    }

    /// Select a GitHub repository and return a [`RepoApi`].
    pub fn repo(self, repo: &str) -> RepoApi {
        RepoApi {
            api: self,
            repo: repo.to_owned(),
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// RepoApi
// ──────────────────────────────────────────────────────────────────────────────

/// Intermediate builder after a repository has been specified.
pub struct RepoApi {
    api: Api,
    repo: String,
}

impl RepoApi {
    /// Target the latest release.
    pub fn latest(self) -> ReleaseApi {
        ReleaseApi {
            api: self.api,
            repo: self.repo,
            tag: None,
        }
    }

    /// Target a specific release by tag (e.g. `"v3.5.1"`).
    pub fn version(self, tag: &str) -> ReleaseApi {
        ReleaseApi {
            api: self.api,
            repo: self.repo,
            tag: Some(tag.to_owned()),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// ReleaseApi
// ──────────────────────────────────────────────────────────────────────────────

/// Intermediate builder after a release has been targeted.
pub struct ReleaseApi {
    api: Api,
    repo: String,
    tag: Option<String>,
}

impl ReleaseApi {
    /// Download every asset whose underscore-delimited name contains `token`
    /// and write each into the output directory under its shortened name.
    pub async fn fetch_reports(self, token: &str) -> Result<FetchOutcome, String> {
        let mut downloader =
            Downloader::with_config(&self.repo, self.api.proxy.clone(), self.api.progress.clone());
        if let Some(tag) = &self.tag {
            downloader.api_url = tagged_release_url(&self.repo, tag);
        }

        let mut fetcher = ReportFetcher::new(&self.repo, &self.api.output_dir);
        fetcher.downloader = downloader;
        fetcher.fetch_reports(token).await
    }
}
