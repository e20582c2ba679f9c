use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

pub mod datascraper;
pub mod parent;
pub mod sampler;

pub use datascraper::{Fetch, LinkSet, Page, Scraper, extract_links};
pub use parent::locate_parent;
pub use sampler::sample_threshold;

use crate::config::{CrawlConfig, Lexicon};
use crate::document::Document;
use crate::error::{CrawlError, Result};
use crate::fingerprint::{Fingerprint, fingerprint};
use crate::similarity::{Score, score};

/// A page accepted as similar to the seed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub url: Url,
    pub score: f64,
}

/// Fetches `url`, treating a fetch that outlives `timeout` as not found.
pub(crate) async fn fetch_page(fetcher: &dyn Fetch, url: &Url, timeout: Duration) -> Result<Page> {
    match tokio::time::timeout(timeout, fetcher.fetch(url)).await {
        Ok(page) => page,
        Err(_) => {
            warn!("Timed out fetching {}", url);
            Ok(Page::NotFound)
        }
    }
}

/// Scores a fetched page against the seed. A page without a single
/// interesting node has nothing to compare and is left unscored.
pub(crate) fn score_page(
    doc: &Document,
    url: &Url,
    target: &Fingerprint,
    lexicon: &Lexicon,
    config: &CrawlConfig,
) -> Score {
    let candidate = fingerprint(doc, lexicon);
    if candidate.is_empty() {
        return Score::Unscored;
    }
    score(&candidate, target, url, config)
}

/// Mutable state of one run, owned by [`Crawler::crawl`] alone.
#[derive(Debug, Default)]
struct CrawlState {
    visited: HashSet<Url>,
    frontier: LinkSet,
    results: Vec<Match>,
}

impl CrawlState {
    fn pending(&self) -> Vec<Url> {
        self.frontier
            .iter()
            .filter(|u| !self.visited.contains(*u))
            .cloned()
            .collect()
    }
}

/// Breadth-first search for pages shaped like a seed event page.
pub struct Crawler<'a> {
    fetcher: Arc<dyn Fetch>,
    lexicon: &'a Lexicon,
    config: CrawlConfig,
}

impl<'a> Crawler<'a> {
    pub fn new(fetcher: Arc<dyn Fetch>, lexicon: &'a Lexicon, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            lexicon,
            config,
        }
    }

    /// Finds pages structurally similar to `seed`, best match first.
    ///
    /// Starts from the links of the seed's nearest existing ancestor and
    /// expands one layer at a time until `quota` matches are held or nothing
    /// new is reachable. A layer can overshoot the quota.
    pub async fn crawl(&self, seed: &Url) -> Result<Vec<Match>> {
        let timeout = self.config.fetch_timeout;
        let fetcher = self.fetcher.as_ref();

        let Page::Found(seed_doc) = fetch_page(fetcher, seed, timeout).await? else {
            return Err(CrawlError::SeedNotFound(seed.to_string()));
        };
        let target = fingerprint(&seed_doc, self.lexicon);
        if target.is_empty() {
            return Err(CrawlError::EmptyFingerprint(seed.to_string()));
        }
        info!("Seed fingerprint has {} paths", target.len());

        let (_, parent) = locate_parent(fetcher, seed, timeout).await?;
        let mut state = CrawlState {
            visited: HashSet::from([seed.clone()]),
            frontier: extract_links(&parent),
            results: Vec::new(),
        };

        let threshold =
            sample_threshold(fetcher, &state.frontier, &target, self.lexicon, &self.config).await?;

        while state.results.len() < self.config.quota {
            let pending = state.pending();
            if pending.is_empty() {
                break;
            }
            info!("Fetching layer of {} pages", pending.len());

            let pages = self.fetch_layer(pending).await?;
            state.visited.extend(std::mem::take(&mut state.frontier));

            let scored: Vec<(Url, Score, LinkSet)> = pages
                .into_par_iter()
                .map(|(url, doc)| {
                    let score = score_page(&doc, &url, &target, self.lexicon, &self.config);
                    (url, score, extract_links(&doc))
                })
                .collect();

            let mut next = LinkSet::new();
            for (url, score, links) in scored {
                match score.distance() {
                    Some(distance) => {
                        debug!("{:.2} {}", distance, url);
                        if distance < threshold {
                            state.results.push(Match { url, score: distance });
                        }
                    }
                    None => debug!("unscored {}", url),
                }
                next.extend(links);
            }
            state.frontier = next;
        }

        let mut results = state.results;
        results.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.url.cmp(&b.url)));
        info!("Found {} similar pages", results.len());
        Ok(results)
    }

    /// Fetches every URL concurrently and waits for all of them. Pages that
    /// are missing or timed out are dropped; any other failure aborts the
    /// remaining fetches.
    async fn fetch_layer(&self, urls: Vec<Url>) -> Result<Vec<(Url, Document)>> {
        let mut join_set = JoinSet::new();
        for url in urls {
            let fetcher = Arc::clone(&self.fetcher);
            let timeout = self.config.fetch_timeout;
            join_set.spawn(async move {
                let page = fetch_page(fetcher.as_ref(), &url, timeout).await;
                (url, page)
            });
        }

        let mut pages = Vec::with_capacity(join_set.len());
        while let Some(joined) = join_set.join_next().await {
            let (url, page) = joined?;
            match page? {
                Page::Found(doc) => pages.push((url, doc)),
                Page::NotFound => debug!("not found {}", url),
            }
        }
        Ok(pages)
    }
}
