//! Full printable memorial structure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{MemorialBlock, MemorialComposer};
use crate::domain::organization::OrganizationHeader;
use crate::domain::project::{ProjectDetails, ServiceItem};

pub const MEMORIAL_TITLE: &str = "MEMORIAL DESCRITIVO DETALHADO";
pub const NO_SERVICES_NOTICE: &str = "Nenhum serviço selecionado.";

const INTRODUCTION: &str = "O presente Memorial Descritivo tem como objetivo detalhar, de forma \
clara e objetiva, os serviços de manutenção e reforma a serem executados no edifício público acima \
identificado. Este documento é parte integrante do Projeto Básico e servirá de alicerce para o \
orçamento, a fiscalização e o recebimento dos serviços, minimizando ambiguidades e garantindo a \
qualidade técnica da execução conforme as normas ABNT vigentes.";

const FINAL_CONSIDERATIONS: &str = "A Contratada deverá seguir fielmente as especificações deste \
memorial. Materiais deverão ser novos e de primeira qualidade. A limpeza final da obra é \
obrigatória para o recebimento definitivo.";

/// Signature block at the end of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureLine {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
}

impl SignatureLine {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            registration: None,
        }
    }

    pub fn with_registration(mut self, registration: impl Into<String>) -> Self {
        self.registration = Some(registration.into());
        self
    }
}

/// A numbered top-level section of the memorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorialSection {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// The assembled memorial: letterhead, identification, three sections, signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorialDocument {
    pub header_lines: Vec<String>,
    pub title: String,
    pub object: String,
    pub location: String,
    pub date: String,
    pub introduction: MemorialSection,
    pub services_title: String,
    pub blocks: Vec<MemorialBlock>,
    pub final_considerations: MemorialSection,
    pub signature: SignatureLine,
}

impl MemorialDocument {
    /// Assembles the document.
    ///
    /// Missing details fall back to placeholder identification lines and
    /// `today` as the date.
    pub fn build(
        header: &OrganizationHeader,
        details: Option<&ProjectDetails>,
        services: &[ServiceItem],
        today: NaiveDate,
    ) -> Self {
        let object = details
            .map(|d| d.object().to_uppercase())
            .unwrap_or_else(|| "OBJETO NÃO DEFINIDO".to_string());
        let location = details
            .map(|d| d.location().to_uppercase())
            .unwrap_or_else(|| "LOCAL NÃO DEFINIDO".to_string());
        let date = details
            .map(|d| d.date())
            .unwrap_or(today)
            .format("%d/%m/%Y")
            .to_string();

        Self {
            header_lines: vec![
                header.secretariat.clone(),
                header.agency.clone(),
                header.division.clone(),
            ],
            title: MEMORIAL_TITLE.to_string(),
            object,
            location,
            date,
            introduction: MemorialSection {
                title: "1. INTRODUÇÃO E OBJETIVO".to_string(),
                paragraphs: vec![INTRODUCTION.to_string()],
            },
            services_title: "2. DESCRIÇÃO DOS SERVIÇOS".to_string(),
            blocks: MemorialComposer::compose(services),
            final_considerations: MemorialSection {
                title: "3. CONSIDERAÇÕES FINAIS".to_string(),
                paragraphs: vec![FINAL_CONSIDERATIONS.to_string()],
            },
            signature: SignatureLine::new("Responsável Técnico")
                .with_registration("CREA/CAU: ______________"),
        }
    }

    pub fn has_services(&self) -> bool {
        !self.blocks.is_empty()
    }
}
