//! Immutable project snapshot and its fingerprint.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use super::{ProjectDetails, ServiceItem};

/// SHA-256 identity of a project snapshot (lowercase hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotFingerprint(String);

impl SnapshotFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project details plus the ordered service list at one point in time.
///
/// All derived documents read from a snapshot, never from the live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub details: ProjectDetails,
    pub services: Vec<ServiceItem>,
}

impl ProjectSnapshot {
    pub fn new(details: ProjectDetails, services: Vec<ServiceItem>) -> Self {
        Self { details, services }
    }

    /// Hash over the canonical JSON encoding of details and services.
    ///
    /// Two snapshots with equal content (including item ids) share a
    /// fingerprint.
    pub fn fingerprint(&self) -> SnapshotFingerprint {
        let mut hasher = Sha256::new();
        // Struct fields serialize in declaration order, so the encoding is stable.
        match serde_json::to_vec(self) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(format!("{:?}", self).as_bytes()),
        }
        SnapshotFingerprint(format!("{:x}", hasher.finalize()))
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snapshot(quantity: f64) -> ProjectSnapshot {
        let details = ProjectDetails::new(
            "Reforma Escola X",
            "Rua A, 1",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "6ª Cia",
        )
        .unwrap();
        let item = ServiceItem::new("18.06.142", "Piso", "m²", quantity).with_prices(51.0, 34.0);
        ProjectSnapshot::new(details, vec![item])
    }

    #[test]
    fn fingerprint_is_stable_for_equal_content() {
        let a = snapshot(10.0);
        let b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().as_str().len(), 64);
    }

    #[test]
    fn fingerprint_changes_with_services() {
        let a = snapshot(10.0);
        let mut b = a.clone();
        b.services[0].quantity = 11.0;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
