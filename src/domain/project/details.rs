//! Project details - the contracting context of a memorial.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::domain::foundation::ValidationError;

/// Contracting context: object, location, date and requesting unit.
///
/// Immutable once built; a new project replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProjectDetailsInput")]
pub struct ProjectDetails {
    object: String,
    location: String,
    date: NaiveDate,
    unit: String,
}

impl ProjectDetails {
    /// Creates validated project details.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` when `object`, `location` or
    /// `unit` is blank.
    pub fn new(
        object: impl Into<String>,
        location: impl Into<String>,
        date: NaiveDate,
        unit: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let object = required("object", object.into())?;
        let location = required("location", location.into())?;
        let unit = required("unit", unit.into())?;
        Ok(Self {
            object,
            location,
            date,
            unit,
        })
    }

    pub fn object(&self) -> &str {
        &self.object
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Date formatted as `dd/mm/yyyy`.
    pub fn formatted_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Unvalidated wire shape of [`ProjectDetails`].
#[derive(Debug, Clone, Deserialize)]
struct ProjectDetailsInput {
    object: String,
    location: String,
    date: NaiveDate,
    unit: String,
}

impl TryFrom<ProjectDetailsInput> for ProjectDetails {
    type Error = ValidationError;

    fn try_from(input: ProjectDetailsInput) -> Result<Self, Self::Error> {
        ProjectDetails::new(input.object, input.location, input.date, input.unit)
    }
}
