//! Memorial module - per-item descriptive text and the full document.

mod composer;
mod document;

pub use composer::{MemorialBlock, MemorialBody, MemorialComposer};
pub use document::{
    MemorialDocument, MemorialSection, SignatureLine, MEMORIAL_TITLE, NO_SERVICES_NOTICE,
};
