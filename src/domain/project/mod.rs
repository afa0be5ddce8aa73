//! Project module - details, service items and the editing session.

mod details;
mod form;
mod service_item;
mod session;
mod snapshot;

pub use details::ProjectDetails;
pub use form::{FormEvent, ServiceForm, DEFAULT_UNIT, LABOR_SHARE, MATERIAL_SHARE};
pub use service_item::{FloorFinish, ServiceItem, DEFAULT_CATEGORY, DEFAULT_SOURCE};
pub use session::ProjectSession;
pub use snapshot::{ProjectSnapshot, SnapshotFingerprint};
