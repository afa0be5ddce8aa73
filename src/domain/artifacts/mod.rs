//! Artifacts module - DFD and ETP procurement documents.
//!
//! The DFD is derived from a project snapshot; the ETP from the same
//! snapshot plus the (possibly edited) DFD. [`ArtifactWorkflow`] enforces
//! that ordering.

mod dfd;
mod document;
mod errors;
mod etp;
mod standards;
mod workflow;

pub use dfd::{Dfd, DfdData, DFD_TITLE};
pub use document::{ArtifactDocument, ArtifactSection, ARTIFACT_HEADER};
pub use errors::ArtifactError;
pub use etp::{has_demolition, methodology_digest, Etp, EtpData, DEMOLITION_CATEGORY, ETP_TITLE};
pub use standards::TechnicalStandard;
pub use workflow::ArtifactWorkflow;
