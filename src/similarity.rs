//! Fingerprint dissimilarity.

use url::Url;

use crate::config::CrawlConfig;
use crate::fingerprint::Fingerprint;

/// Dissimilarity of a candidate page to the seed; lower is closer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Distance(f64),
    /// Too many unmatched paths to compare pairwise.
    Unscored,
}

impl Score {
    pub fn distance(self) -> Option<f64> {
        match self {
            Score::Distance(d) => Some(d),
            Score::Unscored => None,
        }
    }
}

/// Levenshtein distance over chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `left - right`, or the shortest path of `fallback` when that is empty so a
/// structural superset never reads as a perfect match.
fn difference<'a>(
    left: &'a Fingerprint,
    right: &'a Fingerprint,
    fallback: &'a Fingerprint,
) -> Vec<&'a str> {
    let diff: Vec<&str> = left.difference(right).map(String::as_str).collect();
    if !diff.is_empty() {
        return diff;
    }
    fallback
        .iter()
        .min_by_key(|s| s.chars().count())
        .map(String::as_str)
        .into_iter()
        .collect()
}

/// Sum over the seed's unmatched paths of the distance to the nearest unmatched
/// candidate path. Discounted when the candidate URL looks like an event page.
pub fn score(
    candidate: &Fingerprint,
    target: &Fingerprint,
    candidate_url: &Url,
    config: &CrawlConfig,
) -> Score {
    let d1 = difference(target, candidate, candidate);
    let d2 = difference(candidate, target, target);

    if d1.len() * d2.len() >= config.pair_budget {
        return Score::Unscored;
    }

    let total: usize = d1
        .iter()
        .map(|x| d2.iter().map(|y| edit_distance(x, y)).min().unwrap_or(0))
        .sum();

    let mut distance = total as f64;
    if candidate_url.path().contains(config.url_hint.as_str()) {
        distance *= config.hint_discount;
    }
    Score::Distance(distance)
}
