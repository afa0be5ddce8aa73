//! Price-bulletin text scanning.
//!
//! Page text has no reliable row structure, so each page is cut into
//! segments that start at every service code. Within a segment the last
//! pt-BR currency literal is taken as the unit price.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::domain::foundation::{parse_decimal_br, Money, ServiceCode};

static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{3}").expect("valid code pattern"));

static PRICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,3}(?:\.\d{3})*,\d{2}").expect("valid price pattern"));

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)BOLETIM\s*(\d+)").expect("valid version pattern"));

/// Default number of leading pages searched for the bulletin number.
pub const DEFAULT_VERSION_SCAN_PAGES: usize = 3;

/// Result of scanning a whole bulletin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedPrices {
    pub prices: BTreeMap<ServiceCode, Money>,
    /// `CDHU {n}` when a bulletin number was found.
    pub detected_version: Option<String>,
}

impl ExtractedPrices {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

/// Accumulates prices page by page.
#[derive(Debug, Clone)]
pub struct BulletinScan {
    version_scan_pages: usize,
    detected_version: Option<String>,
    prices: BTreeMap<ServiceCode, Money>,
    pages_seen: usize,
}

impl Default for BulletinScan {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION_SCAN_PAGES)
    }
}

impl BulletinScan {
    pub fn new(version_scan_pages: usize) -> Self {
        Self {
            version_scan_pages,
            detected_version: None,
            prices: BTreeMap::new(),
            pages_seen: 0,
        }
    }

    /// Scans one page. `page_number` is 1-based.
    ///
    /// Returns the number of prices recorded from this page.
    pub fn feed_page(&mut self, page_number: usize, text: &str) -> usize {
        self.pages_seen += 1;

        if self.detected_version.is_none() && page_number <= self.version_scan_pages {
            if let Some(caps) = VERSION_PATTERN.captures(text) {
                self.detected_version = Some(format!("CDHU {}", &caps[1]));
            }
        }

        let starts: Vec<usize> = CODE_PATTERN.find_iter(text).map(|m| m.start()).collect();
        let mut recorded = 0;
        for (i, start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            if self.scan_segment(&text[*start..end]) {
                recorded += 1;
            }
        }
        recorded
    }

    // Later segments for the same code overwrite earlier ones.
    fn scan_segment(&mut self, segment: &str) -> bool {
        let Some(code_match) = CODE_PATTERN.find(segment) else {
            return false;
        };
        let Ok(code) = ServiceCode::parse(code_match.as_str()) else {
            return false;
        };
        let price = PRICE_PATTERN
            .find_iter(segment)
            .last()
            .and_then(|m| parse_decimal_br(m.as_str()));
        match price {
            Some(value) if value > 0.0 => {
                self.prices.insert(code, Money::new(value));
                true
            }
            _ => false,
        }
    }

    pub fn pages_seen(&self) -> usize {
        self.pages_seen
    }

    pub fn detected_version(&self) -> Option<&str> {
        self.detected_version.as_deref()
    }

    pub fn finish(self) -> ExtractedPrices {
        ExtractedPrices {
            prices: self.prices,
            detected_version: self.detected_version,
        }
    }
}
