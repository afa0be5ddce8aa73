//! Memorial Text Composer - per-item structured description.
//!
//! Three paths, tried in order:
//! 1. authored [`MemorialDefinition`] copied verbatim
//! 2. flooring narrative when the name mentions floors or coverings
//! 3. summary paragraph, which always succeeds

use serde::{Deserialize, Serialize};

use crate::domain::foundation::format_decimal_br;
use crate::domain::project::ServiceItem;

/// Minimum length for a detailed spec to replace the generated summary.
const DETAILED_SPEC_MIN_CHARS: usize = 20;

const FLOORING_KEYWORDS: [&str; 2] = ["piso", "revestimento"];

/// Text of one numbered memorial entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemorialBody {
    /// Object, methodology, materials and measurement sections.
    Structured {
        object: String,
        methodology: Vec<String>,
        materials: Vec<String>,
        measurement: String,
    },
    /// Single paragraph plus a location/quantity line.
    Summary { description: String, location_line: String },
}

/// A numbered memorial entry for one service item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorialBlock {
    /// 1-based position in the service list.
    pub number: usize,
    pub title: String,
    pub body: MemorialBody,
}

impl MemorialBlock {
    /// Heading line, e.g. `1. Piso cerâmico`.
    pub fn heading(&self) -> String {
        format!("{}. {}", self.number, self.title)
    }
}

/// Memorial text composition functions.
pub struct MemorialComposer;

impl MemorialComposer {
    /// Composes blocks for every item, numbered in list order.
    pub fn compose(items: &[ServiceItem]) -> Vec<MemorialBlock> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::compose_block(i + 1, item))
            .collect()
    }

    /// Composes the block for a single item. Never fails.
    pub fn compose_block(number: usize, item: &ServiceItem) -> MemorialBlock {
        let body = if let Some(def) = &item.memorial_def {
            let mut materials = def.materials.clone();
            if item.has_reference() {
                materials.push(format!("Referência: {}", item.reference_label()));
            }
            MemorialBody::Structured {
                object: def.object.clone(),
                methodology: def.methodology.clone(),
                materials,
                measurement: def.measurement.clone(),
            }
        } else if is_flooring(&item.name) {
            flooring_narrative(item)
        } else {
            summary(item)
        };

        MemorialBlock {
            number,
            title: item.name.clone(),
            body,
        }
    }
}

fn is_flooring(name: &str) -> bool {
    let lower = name.to_lowercase();
    FLOORING_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn flooring_narrative(item: &ServiceItem) -> MemorialBody {
    let object = format!(
        "Este item contempla a remoção integral do revestimento existente e do contrapiso, \
         caso necessário para adequação de níveis, em áreas previamente definidas \
         (Ambiente: {}). Inclui o preparo da nova base com execução de contrapiso \
         regularizado e desempenado, a aplicação de impermeabilização (se aplicável), \
         o assentamento de novo revestimento ({}) e o rejuntamento.",
        item.environment,
        item.reference_label()
    );

    let methodology = vec![
        "Serviços Preliminares: Proteção de áreas adjacentes, remoção cuidadosa de rodapés \
         e soleiras existentes. Limpeza completa da área."
            .to_string(),
        "Demolição: Remoção manual ou mecanizada do revestimento cerâmico existente. \
         Seleção e acondicionamento de resíduos (Classe A) conforme Resolução CONAMA 307/2002."
            .to_string(),
        "Preparação da Base: Verificação do subleito. Execução de novo contrapiso \
         regularizado com argamassa cimento e areia. Aplicação de impermeabilização se \
         área molhada."
            .to_string(),
        "Assentamento: Aplicação de argamassa colante industrializada (AC-II ou AC-III \
         conforme necessidade) com desempenadeira dentada (dupla colagem para peças \
         grandes). Uso de espaçadores plásticos para juntas uniformes."
            .to_string(),
        "Rejuntamento: Após cura (72h), aplicação de rejunte flexível na cor especificada, \
         com acabamento liso e uniforme. Limpeza final."
            .to_string(),
    ];

    let materials = vec![
        format!(
            "Placa Cerâmica/Porcelanato: {}, marca de referência {}, modelo {}. \
             Resistência PEI adequada ao tráfego.",
            item.floor_finish.material_label(),
            item.brand.trim(),
            item.model.trim()
        ),
        "Argamassa Colante: Tipo industrializada AC-II ou AC-III, conforme NBR 14081.".to_string(),
        "Rejunte: Cimentício aditivado, cor a definir pela fiscalização.".to_string(),
    ];

    MemorialBody::Structured {
        object,
        methodology,
        materials,
        measurement: "A medição será realizada pela área real de piso instalado (m²), \
                      descontando-se interferências. A unidade de medida é metro quadrado (m²)."
            .to_string(),
    }
}

fn summary(item: &ServiceItem) -> MemorialBody {
    let spec = item.detailed_spec.trim();
    let description = if spec.chars().count() > DETAILED_SPEC_MIN_CHARS {
        spec.to_string()
    } else {
        format!(
            "Execução completa de {}, incluindo todos os materiais e mão de obra necessários, \
             conforme normas técnicas vigentes e especificação do código {} {}.",
            item.name.to_lowercase(),
            item.source,
            item.code
        )
    };
    MemorialBody::Summary {
        description,
        location_line: format!(
            "Local: {} | Quantidade: {} {}",
            item.environment,
            format_decimal_br(item.quantity, 2),
            item.unit
        ),
    }
}
