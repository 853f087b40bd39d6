use anyhow::{Context, Result};
use rbzscraper::{
    extract,
    fetch::{docs, listing},
    period::Period,
    table::RateTable,
};
use reqwest::Client;
use std::{path::Path, time::Duration};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Reporting periods to scrape, most recent first.
const PERIODS: &[Period] = &[
    Period::new("August", 2025),
    Period::new("July", 2025),
    Period::new("June", 2025),
    Period::new("November", 2024),
    Period::new("October", 2024),
    Period::new("September", 2024),
    Period::new("August", 2024),
    Period::new("July", 2024),
    Period::new("June", 2024),
    Period::new("May", 2024),
    Period::new("April", 2024),
];

/// Wait budget for each HTTP interaction with the listing site.
const WAIT_BUDGET: Duration = Duration::from_secs(10);

const CURRENCY: &str = "USD";
const OUTPUT_FILE: &str = "all-rates.csv";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) run-level resources ──────────────────────────────────────
    let client = Client::builder()
        .timeout(WAIT_BUDGET)
        .build()
        .context("building HTTP client")?;
    // one scratch path, overwritten by each bulletin in turn
    let scratch = tempfile::Builder::new()
        .prefix("bulletin-")
        .suffix(".pdf")
        .tempfile()
        .context("creating scratch file for bulletin downloads")?;
    let mut table = RateTable::new();

    // ─── 3) one period at a time ─────────────────────────────────────
    for period in PERIODS {
        let title = period.title();
        info!(%title, "starting period");

        let month_url = match listing::fetch_month_page(&client, &title).await {
            Ok(url) => url,
            Err(e) => {
                error!(%title, error = %e, "listing filter failed, skipping period");
                continue;
            }
        };
        let bulletins = match listing::fetch_daily_links(&client, &month_url).await {
            Ok(links) => links,
            Err(e) => {
                error!(%title, error = %e, "month page failed, skipping period");
                continue;
            }
        };
        info!(%title, count = bulletins.len(), "processing bulletins");

        // ─── 4) one bulletin at a time ───────────────────────────────
        for bulletin in &bulletins {
            info!(day = %bulletin.day_label, "processing bulletin");
            if let Err(e) = docs::download_pdf(&client, &bulletin.url, scratch.path()).await {
                error!(url = %bulletin.url, error = %e, "download failed, skipping bulletin");
                continue;
            }
            match extract::extract_rate(scratch.path(), CURRENCY) {
                Ok(Some(rate)) => table.push(period, &bulletin.day_label, rate),
                Ok(None) => {
                    warn!(url = %bulletin.url, "no {} rate found in bulletin", CURRENCY)
                }
                Err(e) => {
                    error!(url = %bulletin.url, error = %e, "extraction failed, skipping bulletin")
                }
            }
        }
        info!(%title, total = table.len(), "period done");
    }

    // ─── 5) export ───────────────────────────────────────────────────
    match table.export_csv(Path::new(OUTPUT_FILE))? {
        Some(path) => info!(records = table.len(), "wrote {}", path.display()),
        None => warn!("no data extracted; export skipped"),
    }
    Ok(())
}
