//! Discovery of daily bulletin links from the RBZ exchange-rates listing.
//!
//! The listing page exposes a title filter. Submitting a "Month Year" title
//! yields a result link carrying that exact text, which leads to a month
//! page whose table rows pair a day label (first cell) with the day's
//! bulletin PDF (anchor in the second cell).

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

pub static LISTING_URL: &str =
    "https://www.rbz.co.zw/index.php/research/markets/exchange-rates";

static ANCHORS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("CSS selector for anchors should be valid"));
static ROWS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table tr").expect("CSS selector for table rows should be valid"));
static CELLS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("CSS selector for cells should be valid"));
static PDF_ANCHOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[href$=".pdf"]"#).expect("CSS selector for PDF links should be valid")
});

/// A single daily bulletin: the day label shown in the listing table and
/// the absolute URL of its PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub day_label: String,
    pub url: String,
}

/// Submit the listing title filter and return the URL of the month page
/// whose link text equals `title`.
pub async fn fetch_month_page(client: &Client, title: &str) -> Result<Url> {
    let filtered = Url::parse_with_params(LISTING_URL, &[("filter-search", title)])
        .context("building listing filter URL")?;
    let html = get_text(client, &filtered).await?;
    find_month_link(&html, &filtered, title)
        .ok_or_else(|| anyhow!("no result link titled {:?} on the listing page", title))
}

/// Fetch the month page and return its daily bulletin links in page order.
pub async fn fetch_daily_links(client: &Client, month_url: &Url) -> Result<Vec<DocumentRef>> {
    let html = get_text(client, month_url).await?;
    Ok(parse_daily_links(&html, month_url))
}

/// Find the filter result link whose visible text, trimmed, equals `title`.
pub fn find_month_link(html: &str, base: &Url, title: &str) -> Option<Url> {
    let doc = Html::parse_document(html);
    doc.select(&ANCHORS)
        .find(|a| a.text().collect::<String>().trim() == title)
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| base.join(href).ok())
}

/// Parse the month page's table rows into day-label / PDF-URL pairs.
///
/// Rows without two cells or without a PDF anchor in the second cell are
/// listing chrome (headers, spacers) and are skipped.
pub fn parse_daily_links(html: &str, base: &Url) -> Vec<DocumentRef> {
    let doc = Html::parse_document(html);
    let mut links = Vec::new();

    for row in doc.select(&ROWS) {
        let mut cells = row.select(&CELLS);
        let (Some(first), Some(second)) = (cells.next(), cells.next()) else {
            continue;
        };
        let Some(href) = second
            .select(&PDF_ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };
        let Ok(url) = base.join(href) else { continue };
        links.push(DocumentRef {
            day_label: first.text().collect::<String>().trim().to_string(),
            url: url.to_string(),
        });
    }
    links
}

async fn get_text(client: &Client, url: &Url) -> Result<String> {
    Ok(client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("non-success status from {}", url))?
        .text()
        .await
        .with_context(|| format!("reading body from {}", url))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.rbz.co.zw/index.php/research/markets/exchange-rates").unwrap()
    }

    #[test]
    fn month_link_matches_exact_title_text() {
        let html = r#"
            <ul>
              <li><a href="/documents/daily/april-2024-archive">April 2024 archive</a></li>
              <li><a href="/documents/daily/april-2024"> April 2024 </a></li>
            </ul>
        "#;
        let link = find_month_link(html, &base(), "April 2024").unwrap();
        assert_eq!(
            link.as_str(),
            "https://www.rbz.co.zw/documents/daily/april-2024"
        );
    }

    #[test]
    fn month_link_absent_when_no_text_matches() {
        let html = r#"<a href="/documents/daily/may-2024">May 2024</a>"#;
        assert_eq!(find_month_link(html, &base(), "April 2024"), None);
    }

    #[test]
    fn daily_links_pair_day_labels_with_pdfs() {
        let html = r#"
            <table>
              <tr><th>Day</th><th>Bulletin</th></tr>
              <tr><td>3</td><td><a href="/docs/rates-3.pdf">download</a></td></tr>
              <tr><td>4</td><td><a href="/docs/rates-4.html">web view</a></td></tr>
              <tr><td>10</td><td><a href="/docs/rates-10.pdf">download</a></td></tr>
              <tr><td>spacer</td></tr>
            </table>
        "#;
        let links = parse_daily_links(html, &base());
        assert_eq!(
            links,
            vec![
                DocumentRef {
                    day_label: "3".into(),
                    url: "https://www.rbz.co.zw/docs/rates-3.pdf".into(),
                },
                DocumentRef {
                    day_label: "10".into(),
                    url: "https://www.rbz.co.zw/docs/rates-10.pdf".into(),
                },
            ]
        );
    }

    #[test]
    fn non_pdf_rows_are_dropped() {
        let html = r#"
            <table>
              <tr><td>1</td><td><a href="/docs/rates-1.xlsx">sheet</a></td></tr>
            </table>
        "#;
        assert!(parse_daily_links(html, &base()).is_empty());
    }
}
