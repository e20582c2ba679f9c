//! In-memory site used by crawl tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::crawler::{Fetch, Page};
use crate::document::Document;
use crate::error::{CrawlError, Result};

/// Serves canned HTML by exact URL; unknown URLs are 404s.
#[derive(Clone, Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Answers with a 500.
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Never answers.
    pub fn hanging(mut self, url: &str) -> Self {
        self.hanging.insert(url.to_string());
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Fetch for FakeSite {
    async fn fetch(&self, url: &Url) -> Result<Page> {
        let key = url.as_str();
        *self.hits.lock().unwrap().entry(key.to_string()).or_insert(0) += 1;

        if self.hanging.contains(key) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing.contains(key) {
            return Err(CrawlError::Status {
                url: key.to_string(),
                status: 500,
            });
        }
        Ok(match self.pages.get(key) {
            Some(html) => Page::Found(Document::parse(html, url.clone())),
            None => Page::NotFound,
        })
    }
}

/// An event page whose detail block sits `depth` wrapper divs deep; the same
/// `depth` yields identical fingerprints.
pub fn event_page(depth: usize, title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{l}">more</a>"#))
        .collect();
    let open = "<div>".repeat(depth);
    let close = "</div>".repeat(depth);
    format!(
        "<html><head><title>{title}</title></head><body>\
         <h1>{title}</h1>{open}<p>When: Saturday</p><p>Where: Main hall</p><p>Price: $10</p>{close}\
         <nav>{anchors}</nav></body></html>"
    )
}

/// A page with no interesting nodes.
pub fn plain_page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<a href="{l}">link</a>"#))
        .collect();
    format!("<html><body><h1>Our team</h1><nav>{anchors}</nav></body></html>")
}
