use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use super::datascraper::{Fetch, LinkSet, Page, extract_links};
use super::{fetch_page, score_page};
use crate::config::{CrawlConfig, Lexicon};
use crate::error::Result;
use crate::fingerprint::Fingerprint;

/// Mean of `samples`, never below `floor`. No samples at all yields `floor`.
pub fn threshold_from_samples(samples: &[f64], floor: f64) -> f64 {
    if samples.is_empty() {
        return floor;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    mean.max(floor)
}

/// Derives the acceptance threshold from the first `sample_size` scorable
/// pages reachable from `seed_links`, fetched one at a time breadth first.
///
/// This pass keeps its own seen-set and shares nothing with the main crawl.
/// If the reachable pages run out first, whatever was collected is averaged.
pub async fn sample_threshold(
    fetcher: &dyn Fetch,
    seed_links: &LinkSet,
    target: &Fingerprint,
    lexicon: &Lexicon,
    config: &CrawlConfig,
) -> Result<f64> {
    let timeout: Duration = config.fetch_timeout;
    let mut samples = Vec::with_capacity(config.sample_size);
    let mut seen: HashSet<Url> = HashSet::new();
    let mut batch: Vec<Url> = seed_links.iter().cloned().collect();

    'layers: while !batch.is_empty() && samples.len() < config.sample_size {
        let mut next = LinkSet::new();

        for url in batch {
            if !seen.insert(url.clone()) {
                continue;
            }
            let Page::Found(doc) = fetch_page(fetcher, &url, timeout).await? else {
                continue;
            };

            next.extend(extract_links(&doc));
            if let Some(distance) = score_page(&doc, &url, target, lexicon, config).distance() {
                debug!("Sample {} scored {:.2}", url, distance);
                samples.push(distance);
                if samples.len() == config.sample_size {
                    break 'layers;
                }
            }
        }

        batch = next.into_iter().filter(|u| !seen.contains(u)).collect();
    }

    if samples.len() < config.sample_size {
        warn!(
            "Only {} of {} threshold samples found; averaging what was collected",
            samples.len(),
            config.sample_size
        );
    }

    let threshold = threshold_from_samples(&samples, config.threshold_floor);
    info!("Threshold {:.2} from {} samples", threshold, samples.len());
    Ok(threshold)
}
