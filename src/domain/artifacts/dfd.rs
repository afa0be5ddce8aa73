//! DFD - Documento de Formalização de Demanda.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::document::{ArtifactDocument, ArtifactSection};
use crate::domain::budget::BudgetCalculator;
use crate::domain::foundation::Money;
use crate::domain::project::{ProjectSnapshot, SnapshotFingerprint};

pub const DFD_TITLE: &str = "DOCUMENTO DE FORMALIZAÇÃO DE DEMANDA - DFD";

const DEFAULT_SECTOR: &str = "Departamento de Infraestrutura e Obras";

const STRATEGIC_ALIGNMENT: &str = "A contratação está alinhada ao Planejamento Estratégico do \
Órgão, especificamente na meta de conservação do patrimônio público e melhoria da infraestrutura \
de atendimento ao cidadão.";

const EXPECTED_TIMELINE: &str = "Início imediato após a homologação do processo licitatório, com \
prazo de execução conforme cronograma físico-financeiro.";

/// Editable DFD fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DfdData {
    pub sector: String,
    pub justification: String,
    pub object_description: String,
    pub strategic_alignment: String,
    pub estimated_value: Money,
    pub expected_timeline: String,
}

impl DfdData {
    /// Derives default DFD fields from a project snapshot.
    ///
    /// `estimated_value` is the budget's general total.
    pub fn generate(snapshot: &ProjectSnapshot) -> Self {
        let details = &snapshot.details;
        Self {
            sector: DEFAULT_SECTOR.to_string(),
            justification: format!(
                "A presente demanda se justifica pela necessidade de manutenção e adequação das \
                 instalações do prédio público localizado em {}, visando garantir a segurança, \
                 acessibilidade e funcionalidade para os usuários, conforme vistoria técnica \
                 realizada.",
                details.location()
            ),
            object_description: details.object().to_string(),
            strategic_alignment: STRATEGIC_ALIGNMENT.to_string(),
            estimated_value: BudgetCalculator::aggregate(&snapshot.services).total_general,
            expected_timeline: EXPECTED_TIMELINE.to_string(),
        }
    }

    /// Printable layout: six numbered sections, two signatures.
    pub fn document(&self, date: NaiveDate) -> ArtifactDocument {
        ArtifactDocument::new(
            DFD_TITLE,
            vec![
                ArtifactSection::new("1. SETOR REQUISITANTE:", &self.sector),
                ArtifactSection::new("2. DESCRIÇÃO DO OBJETO:", &self.object_description),
                ArtifactSection::new("3. JUSTIFICATIVA DA NECESSIDADE:", &self.justification),
                ArtifactSection::new("4. ALINHAMENTO ESTRATÉGICO:", &self.strategic_alignment),
                ArtifactSection::new("5. ESTIMATIVA DE VALOR:", self.estimated_value.format_brl()),
                ArtifactSection::new("6. CRONOGRAMA DESEJADO:", &self.expected_timeline),
            ],
            date,
            vec!["Responsável pela Requisição", "Autoridade Competente"],
        )
    }
}

/// A generated DFD and the snapshot it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dfd {
    pub data: DfdData,
    pub derived_from: SnapshotFingerprint,
}

impl Dfd {
    pub fn generate(snapshot: &ProjectSnapshot) -> Self {
        Self {
            data: DfdData::generate(snapshot),
            derived_from: snapshot.fingerprint(),
        }
    }
}
