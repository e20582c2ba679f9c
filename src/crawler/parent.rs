use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use super::datascraper::{Fetch, Page};
use super::fetch_page;
use crate::document::Document;
use crate::error::{CrawlError, Result};

/// Ancestor paths of `url` to probe for a listing page, nearest first,
/// ending with the site root.
///
/// A URL without a query names a page by its last segment, so that segment
/// and its directory are both dropped before the first probe. With a query
/// only the last segment goes. Empty segments, and so trailing slashes, are
/// ignored; every probe is written as a directory.
pub fn ancestor_urls(url: &Url) -> Vec<Url> {
    let mut segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let skip = if url.query().is_some() { 1 } else { 2 };
    segments.truncate(segments.len().saturating_sub(skip));

    let mut origin = url.clone();
    origin.set_query(None);
    origin.set_fragment(None);

    let mut candidates = Vec::with_capacity(segments.len() + 1);
    loop {
        let path = if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", segments.join("/"))
        };
        let mut candidate = origin.clone();
        candidate.set_path(&path);
        candidates.push(candidate);

        if segments.pop().is_none() {
            break;
        }
    }
    candidates
}

/// Fetches the nearest existing ancestor of `url`.
pub async fn locate_parent(fetcher: &dyn Fetch, url: &Url, timeout: Duration) -> Result<(Url, Document)> {
    for candidate in ancestor_urls(url) {
        debug!("Probing parent {}", candidate);
        match fetch_page(fetcher, &candidate, timeout).await? {
            Page::Found(doc) => {
                info!("Parent listing page: {}", candidate);
                return Ok((candidate, doc));
            }
            Page::NotFound => continue,
        }
    }
    Err(CrawlError::ParentNotFound(url.to_string()))
}
