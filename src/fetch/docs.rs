use anyhow::{Context, Result};
use reqwest::Client;
use std::path::Path;
use tokio::fs;

/// Download the bulletin at `url` to `dest`, overwriting whatever is there.
///
/// The orchestrator reuses one scratch path for every bulletin in a run, so
/// the previous document must be fully parsed before this is called again.
pub async fn download_pdf(client: &Client, url: &str, dest: impl AsRef<Path>) -> Result<()> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("non-success status from {}", url))?;
    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("reading body from {}", url))?;
    fs::write(dest.as_ref(), &bytes)
        .await
        .with_context(|| format!("writing {}", dest.as_ref().display()))?;
    Ok(())
}
