//! UTC instants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Calendar date as `dd/mm/yyyy`, in UTC.
    pub fn format_br_date(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
