//! Extraction adapters - implementations of the `PriceExtractor` port.
//!
//! - `PdfPriceExtractor` - Reads the text layer of a PDF bulletin via lopdf
//! - `TextPriceExtractor` - Reads a form-feed separated text dump

mod pdf_price_extractor;
mod text_price_extractor;

pub use pdf_price_extractor::{PdfPriceExtractor, DEFAULT_MAX_PAGES};
pub use text_price_extractor::TextPriceExtractor;
