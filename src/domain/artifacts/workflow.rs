//! DFD → ETP workflow.
//!
//! Artifacts are stored values. Generation is explicit and always replaces
//! the stored artifact, discarding edits; nothing is recomputed implicitly.

use tracing::debug;

use super::{ArtifactError, Dfd, DfdData, Etp, EtpData};
use crate::domain::project::ProjectSnapshot;

/// Holds the generated DFD and ETP for the current project.
#[derive(Debug, Clone, Default)]
pub struct ArtifactWorkflow {
    dfd: Option<Dfd>,
    etp: Option<Etp>,
}

impl ArtifactWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dfd(&self) -> Option<&Dfd> {
        self.dfd.as_ref()
    }

    pub fn etp(&self) -> Option<&Etp> {
        self.etp.as_ref()
    }

    /// Generates the DFD from a snapshot.
    ///
    /// Discards previous DFD edits and any ETP derived from the old DFD.
    pub fn generate_dfd(&mut self, snapshot: &ProjectSnapshot) -> &Dfd {
        let dfd = Dfd::generate(snapshot);
        debug!(
            fingerprint = %dfd.derived_from,
            estimated_value = dfd.data.estimated_value.value(),
            "Generated DFD"
        );
        self.etp = None;
        self.dfd.insert(dfd)
    }

    /// Applies user edits to the stored DFD.
    pub fn edit_dfd(&mut self, edit: impl FnOnce(&mut DfdData)) -> Result<&Dfd, ArtifactError> {
        let dfd = self
            .dfd
            .as_mut()
            .ok_or_else(|| ArtifactError::missing_prerequisite("DFD edit", "DFD"))?;
        edit(&mut dfd.data);
        Ok(&*dfd)
    }

    /// Generates the ETP from a snapshot and the stored DFD.
    ///
    /// # Errors
    ///
    /// `MissingPrerequisite` when no DFD exists or the DFD was derived from
    /// a different snapshot.
    pub fn generate_etp(&mut self, snapshot: &ProjectSnapshot) -> Result<&Etp, ArtifactError> {
        let dfd = match &self.dfd {
            Some(dfd) if dfd.derived_from == snapshot.fingerprint() => dfd,
            _ => return Err(ArtifactError::missing_prerequisite("ETP", "DFD")),
        };
        let etp = Etp::generate(snapshot, &dfd.data);
        debug!(fingerprint = %etp.derived_from, "Generated ETP");
        Ok(&*self.etp.insert(etp))
    }

    /// Applies user edits to the stored ETP.
    pub fn edit_etp(&mut self, edit: impl FnOnce(&mut EtpData)) -> Result<&Etp, ArtifactError> {
        let etp = self
            .etp
            .as_mut()
            .ok_or_else(|| ArtifactError::missing_prerequisite("ETP edit", "ETP"))?;
        edit(&mut etp.data);
        Ok(&*etp)
    }

    /// Drops both artifacts.
    pub fn reset(&mut self) {
        self.dfd = None;
        self.etp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Money;
    use crate::domain::project::{ProjectDetails, ServiceItem};
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
    fn etp_without_dfd_is_rejected() {
        let mut workflow = ArtifactWorkflow::new();
        let err = workflow.generate_etp(&snapshot(10.0)).unwrap_err();
        assert_eq!(err, ArtifactError::missing_prerequisite("ETP", "DFD"));
        assert!(workflow.etp().is_none());
    }

    #[test]
    fn etp_with_dfd_from_other_snapshot_is_rejected() {
        let mut workflow = ArtifactWorkflow::new();
        workflow.generate_dfd(&snapshot(10.0));
        assert!(workflow.generate_etp(&snapshot(12.0)).is_err());
    }

    #[test]
    fn etp_uses_edited_dfd() {
        let snap = snapshot(10.0);
        let mut workflow = ArtifactWorkflow::new();
        workflow.generate_dfd(&snap);
        workflow
            .edit_dfd(|d| {
                d.justification = "Justificativa editada.".to_string();
                d.estimated_value = Money::new(900.0);
            })
            .unwrap();

        let etp = workflow.generate_etp(&snap).unwrap();

        assert_eq!(etp.data.need_description, "Justificativa editada.");
        assert!(etp.data.value_estimate.contains("R$ 900,00"));
    }

    #[test]
    fn regenerating_dfd_discards_edits_and_etp() {
        let snap = snapshot(10.0);
        let mut workflow = ArtifactWorkflow::new();
        workflow.generate_dfd(&snap);
        workflow.edit_dfd(|d| d.sector = "Outro".to_string()).unwrap();
        workflow.generate_etp(&snap).unwrap();

        workflow.generate_dfd(&snap);

        assert_eq!(workflow.dfd().unwrap().data.sector, "Departamento de Infraestrutura e Obras");
        assert!(workflow.etp().is_none());
    }

    #[test]
    fn editing_missing_etp_fails() {
        let mut workflow = ArtifactWorkflow::new();
        assert!(workflow.edit_etp(|e| e.viability.clear()).is_err());
        assert!(workflow.edit_dfd(|d| d.sector.clear()).is_err());
    }
}
