//! Printable layout shared by DFD and ETP.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Letterhead line printed above every artifact title.
pub const ARTIFACT_HEADER: &str = "ESTADO DE SÃO PAULO";

/// A numbered, titled section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSection {
    pub title: String,
    pub body: String,
}

impl ArtifactSection {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Single-column sectioned document with signature lines at the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDocument {
    pub header: String,
    pub title: String,
    pub sections: Vec<ArtifactSection>,
    pub date: NaiveDate,
    pub signatures: Vec<String>,
}

impl ArtifactDocument {
    pub fn new(
        title: impl Into<String>,
        sections: Vec<ArtifactSection>,
        date: NaiveDate,
        signatures: Vec<&str>,
    ) -> Self {
        Self {
            header: ARTIFACT_HEADER.to_string(),
            title: title.into(),
            sections,
            date,
            signatures: signatures.into_iter().map(String::from).collect(),
        }
    }

    /// `Data: dd/mm/yyyy`.
    pub fn date_line(&self) -> String {
        format!("Data: {}", self.date.format("%d/%m/%Y"))
    }
}
