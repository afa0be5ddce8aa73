//! Catalog module - reference service items and price overrides.
//!
//! The reference catalog is static data. Uploaded price bulletins produce
//! a [`PriceOverrides`] set which shadows reference prices without ever
//! removing an entry; [`merge_overrides`] computes the effective catalog.

mod item;
mod overrides;
mod query;
mod reference;

pub use item::{CatalogItem, MemorialDefinition};
pub use overrides::{
    merge_overrides, OverrideRecord, PriceOverrides, RejectedOverride, MODIFIED_MARKER,
    UNLABELED_VERSION,
};
pub use query::{categories, CatalogQuery};
pub use reference::{reference_catalog, BASELINE_VERSION_LABEL};
