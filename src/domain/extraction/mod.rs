//! Extraction module - turning bulletin text into price overrides.

mod bulletin_scan;

pub use bulletin_scan::{BulletinScan, ExtractedPrices, DEFAULT_VERSION_SCAN_PAGES};
