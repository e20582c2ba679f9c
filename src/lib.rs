//! Finds pages on a website that are built from the same template as a known
//! event page, by crawling outward from the page's parent listing and ranking
//! every reachable page by structural similarity.

pub mod config;
pub mod crawler;
pub mod document;
pub mod error;
pub mod fingerprint;
pub mod similarity;

#[cfg(test)]
mod test_support;

pub use config::{CrawlConfig, Lexicon};
pub use crawler::{Crawler, Fetch, Match, Page, Scraper};
pub use error::{CrawlError, Result};
