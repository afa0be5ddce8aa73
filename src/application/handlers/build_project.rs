//! BuildProjectHandler - turns a project file into a session snapshot.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::adapters::project_file::ProjectFile;
use crate::application::CatalogStore;
use crate::domain::foundation::{DomainError, ServiceCode, ValidationError};
use crate::domain::project::{ProjectSession, ProjectSnapshot, ServiceForm};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildProjectError {
    /// Service entry rejected by the form; `line` is 1-based.
    #[error("Service {line}: {source}")]
    InvalidService {
        line: usize,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Project(#[from] ValidationError),
}

impl BuildProjectError {
    pub fn user_message(&self) -> String {
        match self {
            BuildProjectError::InvalidService { line, source } => {
                format!("Serviço {} inválido: {}", line, source)
            }
            BuildProjectError::Project(err) => format!("Projeto inválido: {}", err),
        }
    }
}

impl From<BuildProjectError> for DomainError {
    fn from(err: BuildProjectError) -> Self {
        match err {
            BuildProjectError::InvalidService { source, .. } | BuildProjectError::Project(source) => {
                source.into()
            }
        }
    }
}

/// Resolves catalog codes and runs every entry through the service form.
pub struct BuildProjectHandler {
    catalog: Arc<CatalogStore>,
}

impl BuildProjectHandler {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Entries whose code is missing from the effective catalog are kept
    /// as manual entries under that code.
    pub async fn handle(&self, file: ProjectFile) -> Result<ProjectSnapshot, BuildProjectError> {
        let mut session = ProjectSession::new();
        session.start(file.project);

        for (index, entry) in file.services.iter().enumerate() {
            let catalog_item = match entry.code.as_deref().map(ServiceCode::parse) {
                Some(Ok(code)) => self.catalog.find(&code).await,
                _ => None,
            };
            if catalog_item.is_none() {
                debug!(line = index + 1, code = ?entry.code, "Manual service entry");
            }

            let item = ServiceForm::new()
                .apply_all(entry.events(catalog_item.as_ref()))
                .submit()
                .map_err(|source| BuildProjectError::InvalidService {
                    line: index + 1,
                    source,
                })?;
            session
                .add_service(item)
                .map_err(|source| BuildProjectError::InvalidService {
                    line: index + 1,
                    source,
                })?;
        }

        let snapshot = session.snapshot()?;
        info!(
            object = %snapshot.details.object(),
            services = snapshot.services.len(),
            "Project assembled"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryKeyValueStore, KeyValueOverrideStore};
    use crate::domain::foundation::Money;

    async fn handler() -> BuildProjectHandler {
        let overrides = KeyValueOverrideStore::new(Arc::new(InMemoryKeyValueStore::new()));
        BuildProjectHandler::new(Arc::new(CatalogStore::open(Arc::new(overrides)).await))
    }

    const HEADER: &str = "project:\n  object: Reforma\n  location: Rua A\n  date: 2024-01-10\n  unit: 6ª Cia\n";

    #[tokio::test]
    async fn catalog_code_takes_catalog_price() {
        let yaml = format!("{HEADER}services:\n  - code: '18.06.142'\n    quantity: 10\n");
        let file = ProjectFile::from_yaml(&yaml).unwrap();

        let snapshot = handler().await.handle(file).await.unwrap();

        let item = &snapshot.services[0];
        assert_eq!(item.category, "Pisos e Revestimentos");
        assert_eq!(item.material_unit_price, Money::new(51.0));
        assert_eq!(item.labor_unit_price, Money::new(34.0));
    }

    #[tokio::test]
    async fn unknown_code_becomes_manual_entry() {
        let yaml = format!(
            "{HEADER}services:\n  - code: '99.99.999'\n    description: Avulso\n    quantity: 1\n    material_price: 5\n"
        );
        let file = ProjectFile::from_yaml(&yaml).unwrap();

        let snapshot = handler().await.handle(file).await.unwrap();

        assert_eq!(snapshot.services[0].code, "99.99.999");
        assert_eq!(snapshot.services[0].name, "Avulso");
    }

    #[tokio::test]
    async fn invalid_entry_reports_its_line() {
        let yaml = format!(
            "{HEADER}services:\n  - code: '18.06.142'\n    quantity: 1\n  - description: Sem quantidade\n"
        );
        let file = ProjectFile::from_yaml(&yaml).unwrap();

        let err = handler().await.handle(file).await.unwrap_err();

        assert!(matches!(err, BuildProjectError::InvalidService { line: 2, .. }));
        assert!(err.user_message().starts_with("Serviço 2 inválido"));
    }

    #[tokio::test]
    async fn project_without_services_is_valid() {
        let file = ProjectFile::from_yaml(HEADER).unwrap();
        let snapshot = handler().await.handle(file).await.unwrap();
        assert!(snapshot.is_empty());
    }
}
