//! # reportfetch
//!
//! A Rust library for fetching report assets from a repository's GitHub
//! releases and filing them locally under shortened names, with a chainable,
//! builder-style API.
//!
//! Assets are selected by a naming convention: an asset belongs to the
//! report set iff the given token (e.g. `report.tsv`) appears as a whole
//! underscore-delimited token of its name. Each selected asset is written
//! into the output directory under the last two underscore-delimited tokens
//! of its name, so `omim_ingest_v3_report.tsv_hp` lands as `report.tsv_hp`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reportfetch::Api;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = Api::new();
//!     api.set_output_dir("docs")
//!        .repo("monarch-initiative/omim-ingest")
//!        .latest()
//!        .fetch_reports("report.tsv")
//!        .await
//!        .unwrap();
//! }
//! ```

pub mod api;
pub mod downloader;
pub mod progress;
pub mod report;

pub use api::Api;
pub use downloader::{Asset, Downloader, Release, ReleaseLookup};
pub use progress::default_progress_fn;
pub use report::{FetchOutcome, ReportAsset, ReportFetcher};
