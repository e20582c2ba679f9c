use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::document::Document;
use crate::error::{CrawlError, Result};

/// Same-site links found on a page, absolute and fragment-free.
pub type LinkSet = BTreeSet<Url>;

/// Outcome of fetching one URL.
#[derive(Debug)]
pub enum Page {
    Found(Document),
    NotFound,
}

/// Turns a URL into a parsed page. A 404 is `Ok(Page::NotFound)`; anything
/// else that goes wrong is an error and ends the run.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page>;
}

/// Fetches pages over HTTP with reqwest and parses them with scraper.
#[derive(Clone)]
pub struct Scraper {
    client: Client,
}

impl Scraper {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("eventcrawler/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for Scraper {
    async fn fetch(&self, url: &Url) -> Result<Page> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Page::NotFound);
        }
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await?;
        Ok(Page::Found(Document::parse(&body, final_url)))
    }
}

/// Resolves every anchor on the page against its base URL, keeping links that
/// stay on the same scheme and host, or that were written as plain relative
/// paths. `javascript:` and `mailto:` targets are dropped.
pub fn extract_links(doc: &Document) -> LinkSet {
    let base = doc.base_url();
    let mut links = LinkSet::new();

    for href in doc.hrefs() {
        let href = href.trim();
        let lower = href.to_ascii_lowercase();
        if lower.starts_with("javascript:") || lower.starts_with("mailto:") {
            continue;
        }

        let Ok(mut url) = base.join(href) else {
            continue;
        };
        url.set_fragment(None);
        if !matches!(url.scheme(), "http" | "https") {
            continue;
        }

        // `//host/path` carries its own host, so it is not a plain relative path.
        let relative = !href.contains("://") && !href.starts_with("//");
        let same_site = url.scheme() == base.scheme() && url.host_str() == base.host_str();
        if relative || same_site {
            links.insert(url);
        }
    }
    links
}
