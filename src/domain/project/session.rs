//! In-memory project session.

use tracing::debug;

use super::{ProjectDetails, ProjectSnapshot, ServiceItem};
use crate::domain::foundation::{ServiceItemId, ValidationError};

/// Owns the current project details and its ordered service list.
///
/// Items live only as long as the session; starting a new project or
/// resetting drops them.
#[derive(Debug, Clone, Default)]
pub struct ProjectSession {
    details: Option<ProjectDetails>,
    services: Vec<ServiceItem>,
}

impl ProjectSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new project, discarding the previous one wholesale.
    pub fn start(&mut self, details: ProjectDetails) {
        debug!(object = %details.object(), "Starting project");
        self.details = Some(details);
        self.services.clear();
    }

    pub fn details(&self) -> Option<&ProjectDetails> {
        self.details.as_ref()
    }

    pub fn services(&self) -> &[ServiceItem] {
        &self.services
    }

    /// Appends a service item.
    ///
    /// # Errors
    ///
    /// - `NoActiveProject` if no project was started
    /// - `NotPositive` if the quantity is not strictly positive
    pub fn add_service(&mut self, item: ServiceItem) -> Result<&ServiceItem, ValidationError> {
        if self.details.is_none() {
            return Err(ValidationError::NoActiveProject);
        }
        item.validate()?;
        debug!(code = %item.code, quantity = item.quantity, "Adding service");
        self.services.push(item);
        let last = self.services.len() - 1;
        Ok(&self.services[last])
    }

    /// Removes the item with the given id, returning it.
    pub fn remove_service(&mut self, id: &ServiceItemId) -> Option<ServiceItem> {
        let index = self.services.iter().position(|s| &s.id == id)?;
        Some(self.services.remove(index))
    }

    /// Clears details and services.
    pub fn reset(&mut self) {
        self.details = None;
        self.services.clear();
    }

    /// Captures the current state for document derivation.
    pub fn snapshot(&self) -> Result<ProjectSnapshot, ValidationError> {
        let details = self.details.clone().ok_or(ValidationError::NoActiveProject)?;
        Ok(ProjectSnapshot::new(details, self.services.clone()))
    }
}
