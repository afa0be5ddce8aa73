//! ETP - Estudo Técnico Preliminar.
//!
//! Twelve sections derived from the project snapshot and its DFD. Four of
//! them carry conditional logic: requirements (category standards),
//! solution (per-item objects), quantities (measurement criteria) and
//! environmental impacts (demolition present or not).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::document::{ArtifactDocument, ArtifactSection};
use super::{DfdData, TechnicalStandard};
use crate::domain::foundation::format_decimal_br;
use crate::domain::project::{ProjectSnapshot, ServiceItem, SnapshotFingerprint};

pub const ETP_TITLE: &str = "ESTUDO TÉCNICO PRELIMINAR - ETP";

/// Category whose presence switches the environmental clause.
pub const DEMOLITION_CATEGORY: &str = "Demolições";

const REQUIREMENTS_INTRO: &str =
    "A execução deverá seguir rigorosamente as melhores práticas de engenharia.";

const EXECUTION_REQUIREMENTS: &str = "\n\nRequisitos Específicos de Execução:\n\
- O uso de EPIs é obrigatório durante toda a obra.\n\
- Os materiais devem ser novos e de primeira linha.\n\
- A garantia dos serviços será de 5 (cinco) anos conforme Código Civil.\n\
- A contratada deverá manter preposto capacitado no local.";

const MARKET_RESEARCH: &str = "A estimativa de preços baseou-se em pesquisa de mercado utilizando \
tabelas oficiais de referência (CDHU - Companhia de Desenvolvimento Habitacional e Urbano) \
atualizadas, que refletem os preços praticados no mercado para contratações públicas similares, \
acrescido de BDI compatível.";

const SOLUTION_INTRO: &str =
    "A solução técnica definida abrange a execução dos seguintes serviços especializados:";

const SOLUTION_CLOSING: &str = "Esta solução foi dimensionada para atender a demanda com \
durabilidade, facilidade de manutenção futura e melhor relação custo-benefício.";

const STANDARD_EXECUTION: &str = "Execução conforme especificações técnicas padrão.";

const QUANTITY_NARRATIVE: &str = "As quantidades foram levantadas através de inspeção técnica in \
loco e cálculo geométrico das áreas de intervenção, considerando as dimensões reais do imóvel e \
eventuais perdas inerentes ao processo construtivo.";

const PARTITIONING_JUSTIFICATION: &str = "O parcelamento do objeto não é técnica nem \
economicamente viável. A interdependência das etapas (exime coordenação única para demolição, \
preparo e acabamento) recomenda a contratação global para assegurar a responsabilidade técnica \
única, o cumprimento do cronograma e a garantia integrada da obra (Súmula 247 do TCU).";

const EXPECTED_RESULTS: &str = "Entrega da edificação em perfeitas condições de uso, com \
instalações seguras e adequadas ao funcionamento público; Valorização do patrimônio imobiliário; \
Redução de custos de manutenção corretiva no curto prazo.";

const PRIOR_MEASURES: &str = "Foram realizadas vistorias técnicas para levantamento das \
patologias e definição do escopo. O local encontra-se liberado para início das intervenções.";

const RELATED_HIRES: &str = "Não há contratações correlatas diretas. A fiscalização será exercida \
por equipe própria do órgão contratante.";

const HAZARDOUS_WASTE_CLAUSE: &str = "A execução envolve demolições que geram resíduos Classe A. \
A CONTRATADA deverá elaborar Plano de Gerenciamento de Resíduos da Construção Civil (PGRCC) e \
garantir a destinação em aterros licenciados, conforme Resolução CONAMA 307/2002. É vedada a \
queima de materiais ou disposição em áreas não licenciadas.";

const LOW_COMPLEXITY_WASTE_CLAUSE: &str = "Os serviços geram resíduos de baixa complexidade \
(embalagens, restos de materiais). A contratada deverá proceder com a limpeza diária e o descarte \
em caçambas estacionárias apropriadas.";

const VIABILITY: &str = "O estudo demonstra viabilidade técnica (soluções consagradas), econômica \
(compatível com orçamento) e operacional (prazo exequível). A intervenção é necessária e o retorno \
social justifica o investimento.";

/// Editable ETP fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtpData {
    pub need_description: String,
    pub requirements: String,
    pub market_research: String,
    pub solution_description: String,
    pub quantity_estimate: String,
    pub value_estimate: String,
    pub partitioning_justification: String,
    pub expected_results: String,
    pub prior_measures: String,
    pub related_hires: String,
    pub environmental_impacts: String,
    pub viability: String,
}

impl EtpData {
    /// Derives default ETP fields from the snapshot and its DFD.
    pub fn generate(snapshot: &ProjectSnapshot, dfd: &DfdData) -> Self {
        let services = &snapshot.services;
        Self {
            need_description: dfd.justification.clone(),
            requirements: requirements(services),
            market_research: MARKET_RESEARCH.to_string(),
            solution_description: solution_description(services),
            quantity_estimate: quantity_estimate(services),
            value_estimate: format!(
                "O valor total estimado para a contratação é de {}, sendo compatível com o \
                 praticado no mercado para obras deste porte e complexidade.",
                dfd.estimated_value.format_brl()
            ),
            partitioning_justification: PARTITIONING_JUSTIFICATION.to_string(),
            expected_results: EXPECTED_RESULTS.to_string(),
            prior_measures: PRIOR_MEASURES.to_string(),
            related_hires: RELATED_HIRES.to_string(),
            environmental_impacts: environmental_impacts(services).to_string(),
            viability: VIABILITY.to_string(),
        }
    }

    /// Printable layout: twelve numbered sections, one signature.
    pub fn document(&self, date: NaiveDate) -> ArtifactDocument {
        ArtifactDocument::new(
            ETP_TITLE,
            vec![
                ArtifactSection::new("1. DESCRIÇÃO DA NECESSIDADE:", &self.need_description),
                ArtifactSection::new("2. REQUISITOS DA CONTRATAÇÃO:", &self.requirements),
                ArtifactSection::new("3. LEVANTAMENTO DE MERCADO:", &self.market_research),
                ArtifactSection::new("4. DESCRIÇÃO DA SOLUÇÃO:", &self.solution_description),
                ArtifactSection::new("5. ESTIMATIVA DE QUANTIDADES:", &self.quantity_estimate),
                ArtifactSection::new("6. ESTIMATIVA DO VALOR:", &self.value_estimate),
                ArtifactSection::new(
                    "7. JUSTIFICATIVA PARA O PARCELAMENTO:",
                    &self.partitioning_justification,
                ),
                ArtifactSection::new("8. RESULTADOS PRETENDIDOS:", &self.expected_results),
                ArtifactSection::new("9. PROVIDÊNCIAS PRÉVIAS:", &self.prior_measures),
                ArtifactSection::new("10. CONTRATAÇÕES CORRELATAS:", &self.related_hires),
                ArtifactSection::new("11. IMPACTOS AMBIENTAIS:", &self.environmental_impacts),
                ArtifactSection::new("12. VIABILIDADE:", &self.viability),
            ],
            date,
            vec!["Responsável pela Elaboração do ETP"],
        )
    }
}

fn requirements(services: &[ServiceItem]) -> String {
    let standards = TechnicalStandard::applicable(services);
    let mut text = REQUIREMENTS_INTRO.to_string();
    if !standards.is_empty() {
        text.push_str("\n\nNormas Técnicas Obrigatórias:\n");
        let lines: Vec<String> = standards.iter().map(|s| format!("- {}", s.label())).collect();
        text.push_str(&lines.join("\n"));
    }
    text.push_str(EXECUTION_REQUIREMENTS);
    text
}

fn solution_description(services: &[ServiceItem]) -> String {
    let lines: Vec<String> = services
        .iter()
        .map(|s| match &s.memorial_def {
            Some(def) => format!("-> {}: {}", s.name, def.object),
            None => format!("-> {}: {}", s.name, STANDARD_EXECUTION),
        })
        .collect();
    format!("{}\n\n{}\n\n{}", SOLUTION_INTRO, lines.join("\n"), SOLUTION_CLOSING)
}

fn quantity_estimate(services: &[ServiceItem]) -> String {
    let criteria: Vec<String> = services
        .iter()
        .filter_map(|s| {
            let def = s.memorial_def.as_ref()?;
            if def.measurement.is_empty() {
                return None;
            }
            Some(format!(
                "- {}: {} {} (Critério: {})",
                s.name,
                format_decimal_br(s.quantity, 2),
                s.unit,
                def.measurement
            ))
        })
        .collect();

    if criteria.is_empty() {
        QUANTITY_NARRATIVE.to_string()
    } else {
        format!(
            "{}\n\nDetalhamento dos Quantitativos e Critérios de Medição:\n{}",
            QUANTITY_NARRATIVE,
            criteria.join("\n")
        )
    }
}

/// True if any item is a demolition.
pub fn has_demolition(services: &[ServiceItem]) -> bool {
    services.iter().any(|s| s.category == DEMOLITION_CATEGORY)
}

fn environmental_impacts(services: &[ServiceItem]) -> &'static str {
    if has_demolition(services) {
        HAZARDOUS_WASTE_CLAUSE
    } else {
        LOW_COMPLEXITY_WASTE_CLAUSE
    }
}

/// Distinct methodology steps across authored definitions, first appearance first.
pub fn methodology_digest(services: &[ServiceItem]) -> Vec<String> {
    let mut steps: Vec<String> = Vec::new();
    for step in services
        .iter()
        .filter_map(|s| s.memorial_def.as_ref())
        .flat_map(|def| def.methodology.iter())
    {
        if !steps.contains(step) {
            steps.push(step.clone());
        }
    }
    steps
}

/// A generated ETP, the snapshot it was derived from and its diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Etp {
    pub data: EtpData,
    pub derived_from: SnapshotFingerprint,
    methodology_digest: Vec<String>,
}

impl Etp {
    pub fn generate(snapshot: &ProjectSnapshot, dfd: &DfdData) -> Self {
        Self {
            data: EtpData::generate(snapshot, dfd),
            derived_from: snapshot.fingerprint(),
            methodology_digest: methodology_digest(&snapshot.services),
        }
    }

    /// Deduplicated methodology steps. Diagnostic only, never rendered.
    pub fn methodology_digest(&self) -> &[String] {
        &self.methodology_digest
    }
}
