use std::path::{Path, PathBuf};

use reqwest::StatusCode;

use crate::downloader::{Downloader, Release, ReleaseLookup};
use crate::progress::default_progress_fn;

/// A release asset selected by the report naming convention, paired with
/// the local filename it will be written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportAsset {
    /// Full asset name as published on the release.
    pub name: String,
    /// Direct download URL for the asset body.
    pub download_url: String,
    /// Local filename: the last two underscore-delimited tokens of `name`.
    pub output_name: String,
}

/// Outcome of a [`ReportFetcher::fetch_reports`] run.
///
/// The first three variants are soft outcomes: the run still counts as a
/// success and callers are expected to fall back to locally generated
/// reports. Hard faults (transport, parse, filesystem) surface as `Err`
/// instead.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The repository has no published release.
    NoRelease,
    /// The release lookup answered with a non-success status other than 404.
    LookupFailed(StatusCode),
    /// The release carries no asset matching the report convention.
    NoReports,
    /// Paths of the written report files, in processing order.
    Downloaded(Vec<PathBuf>),
}

/// True iff `token` appears as a whole underscore-delimited token of `name`.
///
/// Membership is positional-agnostic: `a_report.tsv_b` matches the token
/// `report.tsv` just as `x_report.tsv` does, while `reports` or
/// `report.tsv.gz` as tokens do not.
pub fn is_report_name(name: &str, token: &str) -> bool {
    name.split('_').any(|t| t == token)
}

/// Local filename for an asset: its last two underscore-delimited tokens,
/// re-joined with `_`. Names with fewer than two tokens map to themselves.
pub fn output_name(asset_name: &str) -> String {
    let tokens: Vec<&str> = asset_name.split('_').collect();
    let start = tokens.len().saturating_sub(2);
    tokens[start..].join("_")
}

/// Build the run-scoped report mapping from a release's asset list.
///
/// Order follows the asset list, so downloads and confirmations are
/// deterministic.
pub fn select_reports(release: &Release, token: &str) -> Vec<ReportAsset> {
    release
        .assets
        .iter()
        .filter(|asset| is_report_name(&asset.name, token))
        .map(|asset| ReportAsset {
            name: asset.name.clone(),
            download_url: asset.browser_download_url.clone(),
            output_name: output_name(&asset.name),
        })
        .collect()
}

/// Fetches the report assets of a release and files them locally.
pub struct ReportFetcher {
    /// Directory the renamed report files are written into.
    pub output_dir: String,
    /// Downloader used for HTTP operations.
    pub downloader: Downloader,
}

impl ReportFetcher {
    /// Create a fetcher for `repo` writing into `output_dir`, with default
    /// progress reporting.
    pub fn new(repo: &str, output_dir: &str) -> Self {
        Self {
            output_dir: output_dir.to_owned(),
            downloader: Downloader::with_config(repo, None, Some(default_progress_fn())),
        }
    }

    /// Run the whole procedure: look up the release, select report assets,
    /// download each one and write it under its shortened name.
    ///
    /// A missing release, a failed lookup, and an empty selection all print
    /// a notice and return `Ok` with the matching [`FetchOutcome`]; the
    /// caller is expected to fall back to locally generated reports. An
    /// error during a download or write aborts the remaining files.
    pub async fn fetch_reports(&self, token: &str) -> Result<FetchOutcome, String> {
        let release = match self.downloader.latest_release().await? {
            ReleaseLookup::Found(release) => release,
            ReleaseLookup::NotFound => {
                println!("No releases found at {}", self.downloader.api_url);
                println!("Skipping report download - will use locally generated reports");
                return Ok(FetchOutcome::NoRelease);
            }
            ReleaseLookup::Failed { status, body } => {
                eprintln!(
                    "Warning: Failed to get latest release from {}",
                    self.downloader.api_url
                );
                eprintln!("Status: {status} - {body}");
                println!("Skipping report download - will use locally generated reports");
                return Ok(FetchOutcome::LookupFailed(status));
            }
        };

        let reports = select_reports(&release, token);
        if reports.is_empty() {
            println!("No report assets found in the latest release");
            println!("Skipping report download - will use locally generated reports");
            return Ok(FetchOutcome::NoReports);
        }

        println!("Downloading {} report(s) from latest release...", reports.len());
        let mut written = Vec::with_capacity(reports.len());
        for report in &reports {
            let path = self.write_report(report).await?;
            println!("  ✓ Downloaded {}", report.output_name);
            written.push(path);
        }
        Ok(FetchOutcome::Downloaded(written))
    }

    /// Download one report body and write it verbatim under `output_dir`.
    /// An existing file at the target path is replaced.
    async fn write_report(&self, report: &ReportAsset) -> Result<PathBuf, String> {
        let bytes = self
            .downloader
            .download_bytes(&report.download_url)
            .await
            .map_err(|e| format!("error downloading {}: {e}", report.name))?;

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| format!("error creating output directory: {e}"))?;

        let path = Path::new(&self.output_dir).join(&report.output_name);
        std::fs::write(&path, &bytes)
            .map_err(|e| format!("error writing {}: {e}", report.output_name))?;
        Ok(path)
    }
}
