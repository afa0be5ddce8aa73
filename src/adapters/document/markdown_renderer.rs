//! Markdown renderer for the printable documents.
//!
//! Produces the markdown fed to the export service. Memorial blocks keep
//! the A to D subsection layout of the printed memorial; artifact documents
//! are a flat list of sections followed by signature lines.

use crate::domain::artifacts::ArtifactDocument;
use crate::domain::memorial::{MemorialBlock, MemorialBody, MemorialDocument, NO_SERVICES_NOTICE};

/// Longest list-item prefix treated as an inline label (`Label: text`).
const MAX_LABEL_LEN: usize = 40;

const SIGNATURE_RULE: &str = "______________________________________";

/// Renders domain documents to markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders the full memorial.
    pub fn memorial(&self, doc: &MemorialDocument) -> String {
        let mut out = String::new();

        for line in &doc.header_lines {
            out.push_str(&format!("**{}**  \n", line));
        }
        out.push('\n');
        out.push_str(&format!("# {}\n\n", doc.title));
        out.push_str(&format!("**OBJETO:** {}  \n", doc.object));
        out.push_str(&format!("**LOCAL:** {}  \n", doc.location));
        out.push_str(&format!("**DATA:** {}\n\n", doc.date));

        out.push_str(&format!("## {}\n\n", doc.introduction.title));
        for paragraph in &doc.introduction.paragraphs {
            out.push_str(&format!("{}\n\n", paragraph));
        }

        out.push_str(&format!("## {}\n\n", doc.services_title));
        if doc.has_services() {
            for block in &doc.blocks {
                out.push_str(&self.memorial_block(block));
            }
        } else {
            out.push_str(&format!("*{}*\n\n", NO_SERVICES_NOTICE));
        }

        out.push_str(&format!("## {}\n\n", doc.final_considerations.title));
        for paragraph in &doc.final_considerations.paragraphs {
            out.push_str(&format!("{}\n\n", paragraph));
        }

        out.push_str("---\n\n");
        out.push_str(&format!("{}  \n", SIGNATURE_RULE));
        out.push_str(&format!("**{}**", doc.signature.role));
        if let Some(registration) = &doc.signature.registration {
            out.push_str(&format!("  \n{}", registration));
        }
        out.push('\n');
        out
    }

    /// Renders one numbered service block.
    pub fn memorial_block(&self, block: &MemorialBlock) -> String {
        let mut out = format!("### {}\n\n", block.heading());

        match &block.body {
            MemorialBody::Structured {
                object,
                methodology,
                materials,
                measurement,
            } => {
                out.push_str("**A. OBJETO ESPECÍFICO:**\n\n");
                out.push_str(&format!("{}\n\n", object));

                out.push_str("**B. EXECUÇÃO / METODOLOGIA:**\n\n");
                push_list(&mut out, methodology);

                out.push_str("**C. MATERIAIS:**\n\n");
                push_list(&mut out, materials);

                out.push_str("**D. CRITÉRIOS DE MEDIÇÃO:**\n\n");
                out.push_str(&format!("{}\n\n", measurement));
            }
            MemorialBody::Summary {
                description,
                location_line,
            } => {
                out.push_str(&format!("{}\n\n", description));
                out.push_str(&format!("*{}*\n\n", location_line));
            }
        }
        out
    }

    /// Renders a DFD or ETP.
    pub fn artifact(&self, doc: &ArtifactDocument) -> String {
        let mut out = format!("**{}**\n\n# {}\n\n", doc.header, doc.title);

        for section in &doc.sections {
            out.push_str(&format!("## {}\n\n", section.title));
            for paragraph in section.body.split('\n') {
                if paragraph.trim().is_empty() {
                    continue;
                }
                out.push_str(&format!("{}\n\n", paragraph));
            }
        }

        out.push_str(&format!("{}\n\n---\n\n", doc.date_line()));
        for signature in &doc.signatures {
            out.push_str(&format!("{}  \n**{}**\n\n", SIGNATURE_RULE, signature));
        }
        out
    }
}

fn push_list(out: &mut String, items: &[String]) {
    for item in items {
        out.push_str(&format!("- {}\n", emphasize_label(item)));
    }
    out.push('\n');
}

/// `Label: text` becomes `**Label:** text` for short labels.
fn emphasize_label(item: &str) -> String {
    match item.split_once(": ") {
        Some((label, rest)) if label.chars().count() <= MAX_LABEL_LEN && !label.contains('.') => {
            format!("**{}:** {}", label, rest)
        }
        _ => item.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifacts::{ArtifactDocument, ArtifactSection};
    use crate::domain::catalog::MemorialDefinition;
    use crate::domain::organization::OrganizationHeader;
    use crate::domain::project::ServiceItem;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn emphasize_label_bolds_short_prefix() {
        assert_eq!(
            emphasize_label("Rejunte: Cimentício aditivado"),
            "**Rejunte:** Cimentício aditivado"
        );
        assert_eq!(emphasize_label("Sem rótulo aqui"), "Sem rótulo aqui");
        assert_eq!(emphasize_label("Frase longa. Depois: algo"), "Frase longa. Depois: algo");
    }

    #[test]
    fn memorial_without_services_shows_notice() {
        let doc = MemorialDocument::build(&OrganizationHeader::default(), None, &[], date());
        let md = MarkdownRenderer::new().memorial(&doc);

        assert!(md.contains("# MEMORIAL DESCRITIVO DETALHADO"));
        assert!(md.contains("**OBJETO:** OBJETO NÃO DEFINIDO"));
        assert!(md.contains(NO_SERVICES_NOTICE));
        assert!(md.contains("**Responsável Técnico**"));
    }

    #[test]
    fn structured_block_has_four_subsections() {
        let item = ServiceItem::new("33.10.030", "Pintura látex", "m²", 10.0)
            .with_memorial(MemorialDefinition {
                object: "Pintura das paredes internas.".to_string(),
                methodology: vec!["Lixamento: remover imperfeições".to_string()],
                materials: vec!["Tinta látex PVA".to_string()],
                measurement: "Por área pintada (m²).".to_string(),
            })
            .with_reference("Suvinil", "Fosco");
        let doc = MemorialDocument::build(&OrganizationHeader::default(), None, &[item], date());

        let md = MarkdownRenderer::new().memorial(&doc);

        assert!(md.contains("### 1. Pintura látex"));
        assert!(md.contains("**A. OBJETO ESPECÍFICO:**"));
        assert!(md.contains("- **Lixamento:** remover imperfeições"));
        assert!(md.contains("- **Referência:** Suvinil Fosco"));
        assert!(md.contains("**D. CRITÉRIOS DE MEDIÇÃO:**"));
    }

    #[test]
    fn artifact_lists_sections_and_signatures() {
        let doc = ArtifactDocument::new(
            "DOCUMENTO DE TESTE",
            vec![
                ArtifactSection::new("1. PRIMEIRA:", "linha a\nlinha b"),
                ArtifactSection::new("2. SEGUNDA:", "texto"),
            ],
            date(),
            vec!["Responsável", "Autoridade"],
        );

        let md = MarkdownRenderer::new().artifact(&doc);

        assert!(md.starts_with("**ESTADO DE SÃO PAULO**"));
        assert!(md.contains("## 1. PRIMEIRA:\n\nlinha a\n\nlinha b"));
        assert!(md.contains("## 2. SEGUNDA:"));
        assert!(md.contains("Data: 15/03/2024"));
        assert!(md.contains("**Autoridade**"));
    }
}
