//! Target lexicon and crawl constants.
//!
//! Both values are built once at startup and handed to every component by
//! reference; nothing here is mutated after construction.

use std::time::Duration;

use regex::Regex;

const KEYWORDS: &[&str] = &[
    "when", "where", "phone", "price", "ticket", "admission",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "january", "february", "march", "april", "may", "june", "july", "august",
    "september", "october", "november", "december",
];

const PATTERNS: &[&str] = &[
    // four digit years in this century
    r"^20\d{2}",
    // (415) 555-1234, 415.555.1234, 415-555-1234
    r"^\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}",
];

/// Words and patterns that mark a text node as part of an event's details.
#[derive(Debug, Clone)]
pub struct Lexicon {
    keywords: Vec<String>,
    patterns: Vec<Regex>,
    min_len: usize,
}

impl Lexicon {
    /// Build a lexicon from lowercase keywords and regular expressions.
    /// Patterns are matched against the start of lowercased text.
    pub fn new<K, P>(keywords: K, patterns: P) -> Result<Self, regex::Error>
    where
        K: IntoIterator,
        K::Item: Into<String>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.into().to_lowercase())
            .collect();
        let patterns = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let min_len = keywords.iter().map(|k| k.chars().count()).min().unwrap_or(0);

        Ok(Self {
            keywords,
            patterns,
            min_len,
        })
    }

    /// Length of the shortest keyword; shorter text can never match.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Whether already-lowercased text contains a keyword or starts with a pattern match.
    pub fn matches(&self, text: &str) -> bool {
        if text.chars().count() < self.min_len {
            return false;
        }
        self.keywords.iter().any(|k| text.contains(k.as_str()))
            || self
                .patterns
                .iter()
                .any(|re| re.find(text).is_some_and(|m| m.start() == 0))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(KEYWORDS.iter().copied(), PATTERNS.iter().copied())
            .expect("built-in lexicon patterns are valid")
    }
}

/// Numeric knobs of a discovery run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Stop expanding once this many matches are collected
    pub quota: usize,

    /// Number of scores averaged into the acceptance threshold
    pub sample_size: usize,

    /// Lower bound on the acceptance threshold
    pub threshold_floor: f64,

    /// Pages whose `|d1| * |d2|` reaches this are left unscored
    pub pair_budget: usize,

    /// Substring of a URL path that earns the distance discount
    pub url_hint: String,

    /// Multiplier applied to distances of URLs containing `url_hint`
    pub hint_discount: f64,

    /// Upper bound on a single fetch; expiry counts as not found
    pub fetch_timeout: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            quota: 10,
            sample_size: 5,
            threshold_floor: 10.0,
            pair_budget: 37,
            url_hint: "events".to_string(),
            hint_discount: 0.5,
            fetch_timeout: Duration::from_secs(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_keyword_is_may() {
        assert_eq!(Lexicon::default().min_len(), 3);
    }

    #[test]
    fn keywords_match_as_substrings() {
        let lexicon = Lexicon::default();
        assert!(lexicon.matches("when: monday, june 1"));
        assert!(lexicon.matches("tickets on sale"));
        assert!(!lexicon.matches("about us"));
    }

    #[test]
    fn patterns_are_anchored_at_start() {
        let lexicon = Lexicon::default();
        assert!(lexicon.matches("2024 season"));
        assert!(lexicon.matches("(415) 555-1234"));
        assert!(lexicon.matches("415.555.1234 ext 2"));
        assert!(!lexicon.matches("since 2024"));
        assert!(!lexicon.matches("call 415-555-1234"));
    }

    #[test]
    fn short_text_is_skipped() {
        let lexicon = Lexicon::new(["where"], [r"^\d"]).unwrap();
        assert!(!lexicon.matches("12"));
        assert!(lexicon.matches("12345"));
    }
}
