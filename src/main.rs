use reportfetch::Api;

/// Repository whose releases carry the ingest report assets.
const REPORT_REPO: &str = "monarch-initiative/omim-ingest";

/// Token that marks an asset as a report within its underscore-delimited name.
const REPORT_TOKEN: &str = "report.tsv";

/// Directory the renamed report files are written into.
const OUTPUT_DIR: &str = "docs";

#[tokio::main]
async fn main() -> Result<(), String> {
    Api::new()
        .set_output_dir(OUTPUT_DIR)
        .repo(REPORT_REPO)
        .latest()
        .fetch_reports(REPORT_TOKEN)
        .await?;
    Ok(())
}
