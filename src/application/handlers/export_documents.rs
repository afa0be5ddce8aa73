//! ExportDocumentsHandler - writes the memorial, budget, DFD and ETP.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::adapters::document::MarkdownRenderer;
use crate::domain::artifacts::{ArtifactError, ArtifactWorkflow};
use crate::domain::budget::{BudgetAggregate, BudgetSheet};
use crate::domain::foundation::DomainError;
use crate::domain::memorial::MemorialDocument;
use crate::domain::organization::OrganizationHeader;
use crate::domain::project::ProjectSnapshot;
use crate::ports::{
    BudgetSpreadsheetExporter, DocumentExportService, ExportError, ExportFormat, OutputStorage,
};

pub const DFD_FILE_STEM: &str = "DFD-Documento_Formalizacao_Demanda";
pub const ETP_FILE_STEM: &str = "ETP-Estudo_Tecnico_Preliminar";

/// Used when the object sanitizes to nothing.
const FALLBACK_OBJECT: &str = "Servicos";

/// Command to export every document of a project snapshot.
#[derive(Debug, Clone)]
pub struct ExportDocumentsCommand {
    pub snapshot: ProjectSnapshot,
    /// Formats for the memorial, DFD and ETP. The budget is always `.xlsx`.
    /// Repeats are ignored.
    pub formats: Vec<ExportFormat>,
    /// Date printed on the DFD and ETP.
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct ExportDocumentsResult {
    pub files: Vec<PathBuf>,
    pub aggregate: BudgetAggregate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportDocumentsError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl ExportDocumentsError {
    pub fn user_message(&self) -> String {
        match self {
            ExportDocumentsError::Export(err) => err.user_message(),
            ExportDocumentsError::Artifact(err) => err.user_message(),
        }
    }
}

impl From<ExportDocumentsError> for DomainError {
    fn from(err: ExportDocumentsError) -> Self {
        match err {
            ExportDocumentsError::Export(e) => e.into(),
            ExportDocumentsError::Artifact(e) => e.into(),
        }
    }
}

/// Replaces characters that are unsafe in file names with `_`.
///
/// Runs of unsafe characters and whitespace collapse into one `_`.
pub fn sanitize_file_stem(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.trim().chars() {
        let unsafe_char = c.is_whitespace()
            || c.is_control()
            || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.');
        if unsafe_char {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('_');
        }
        pending_separator = false;
        out.push(c);
    }

    if out.is_empty() {
        FALLBACK_OBJECT.to_string()
    } else {
        out
    }
}

/// Handler for document export.
pub struct ExportDocumentsHandler {
    renderer: MarkdownRenderer,
    export_service: Arc<dyn DocumentExportService>,
    spreadsheet: Arc<dyn BudgetSpreadsheetExporter>,
    output: Arc<dyn OutputStorage>,
    header: OrganizationHeader,
}

impl ExportDocumentsHandler {
    pub fn new(
        export_service: Arc<dyn DocumentExportService>,
        spreadsheet: Arc<dyn BudgetSpreadsheetExporter>,
        output: Arc<dyn OutputStorage>,
        header: OrganizationHeader,
    ) -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            export_service,
            spreadsheet,
            output,
            header,
        }
    }

    /// Writes all documents for the snapshot.
    ///
    /// A DFD or ETP already held by `workflow` for the same snapshot is
    /// exported as edited; stale or missing ones are generated first.
    /// Every file is rendered before the first one is written, and a
    /// failed write removes the files already written.
    pub async fn handle(
        &self,
        cmd: ExportDocumentsCommand,
        workflow: &mut ArtifactWorkflow,
    ) -> Result<ExportDocumentsResult, ExportDocumentsError> {
        let snapshot = &cmd.snapshot;
        let fingerprint = snapshot.fingerprint();
        let object_stem = sanitize_file_stem(snapshot.details.object());
        let formats = unique_formats(&cmd.formats);
        let mut rendered = Vec::new();

        // Memorial
        let memorial = MemorialDocument::build(
            &self.header,
            Some(&snapshot.details),
            &snapshot.services,
            cmd.date,
        );
        let markdown = self.renderer.memorial(&memorial);
        let stem = format!("Memorial_{}", object_stem);
        rendered.extend(self.render_text_document(&stem, &markdown, &formats).await?);

        // Budget
        let sheet = BudgetSheet::build(&self.header, snapshot);
        let workbook = self.spreadsheet.export(&sheet).await.map_err(|e| {
            error!(error = %e, "Budget spreadsheet generation failed");
            e
        })?;
        let name = format!("Orcamento_{}.{}", object_stem, ExportFormat::Xlsx.extension());
        rendered.push((name, workbook));

        // DFD, then ETP from the same snapshot
        if workflow.dfd().map(|d| &d.derived_from) != Some(&fingerprint) {
            workflow.generate_dfd(snapshot);
        }
        if workflow.etp().map(|e| &e.derived_from) != Some(&fingerprint) {
            workflow.generate_etp(snapshot)?;
        }
        let (dfd_doc, etp_doc) = match (workflow.dfd(), workflow.etp()) {
            (Some(dfd), Some(etp)) => (dfd.data.document(cmd.date), etp.data.document(cmd.date)),
            (None, _) => return Err(ArtifactError::missing_prerequisite("DFD", "projeto").into()),
            (_, None) => return Err(ArtifactError::missing_prerequisite("ETP", "DFD").into()),
        };

        let dfd_md = self.renderer.artifact(&dfd_doc);
        rendered.extend(self.render_text_document(DFD_FILE_STEM, &dfd_md, &formats).await?);
        let etp_md = self.renderer.artifact(&etp_doc);
        rendered.extend(self.render_text_document(ETP_FILE_STEM, &etp_md, &formats).await?);

        let files = self.write_all(rendered).await?;

        info!(files = files.len(), object = %snapshot.details.object(), "Documents exported");
        Ok(ExportDocumentsResult {
            files,
            aggregate: sheet.aggregate,
        })
    }

    async fn render_text_document(
        &self,
        stem: &str,
        markdown: &str,
        formats: &[ExportFormat],
    ) -> Result<Vec<(String, Vec<u8>)>, ExportError> {
        let mut rendered = Vec::new();
        for format in formats {
            let content = match format {
                ExportFormat::Markdown => markdown.as_bytes().to_vec(),
                ExportFormat::Html => self.export_service.to_html(markdown).await?.into_bytes(),
                ExportFormat::Pdf => self.export_service.to_pdf(markdown).await.map_err(|e| {
                    error!(document = stem, error = %e, "PDF conversion failed");
                    e
                })?,
                ExportFormat::Xlsx => continue,
            };
            rendered.push((format!("{}.{}", stem, format.extension()), content));
        }
        Ok(rendered)
    }

    async fn write_all(
        &self,
        rendered: Vec<(String, Vec<u8>)>,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let mut written: Vec<(String, PathBuf)> = Vec::with_capacity(rendered.len());
        for (name, content) in rendered {
            match self.output.write(&name, &content).await {
                Ok(path) => written.push((name, path)),
                Err(e) => {
                    error!(file = %name, error = %e, "Failed to write exported file");
                    for (done, _) in &written {
                        if let Err(cleanup) = self.output.remove(done).await {
                            warn!(file = %done, error = %cleanup, "Could not remove partial export");
                        }
                    }
                    return Err(e);
                }
            }
        }
        Ok(written.into_iter().map(|(_, path)| path).collect())
    }
}

/// Requested formats without repeats, in first-request order.
fn unique_formats(formats: &[ExportFormat]) -> Vec<ExportFormat> {
    let mut seen = HashSet::new();
    formats.iter().copied().filter(|f| seen.insert(*f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::{PulldownExportService, XlsxBudgetExporter};
    use crate::adapters::storage::LocalOutputStorage;
    use crate::domain::foundation::Money;
    use crate::domain::project::{ProjectDetails, ServiceItem};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn snapshot() -> ProjectSnapshot {
        let details = ProjectDetails::new(
            "Reforma do Refeitório / Bloco A",
            "Rua A, 1",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "6ª Cia",
        )
        .unwrap();
        let item = ServiceItem::new("18.06.142", "Piso porcelanato", "m²", 10.0)
            .with_prices(51.0, 34.0)
            .with_category("Pisos e Revestimentos");
        ProjectSnapshot::new(details, vec![item])
    }

    fn handler(dir: &TempDir) -> ExportDocumentsHandler {
        ExportDocumentsHandler::new(
            Arc::new(PulldownExportService::new()),
            Arc::new(XlsxBudgetExporter::new()),
            Arc::new(LocalOutputStorage::new(dir.path())),
            OrganizationHeader::default(),
        )
    }

    fn file_names(dir: &TempDir) -> Vec<String> {
        std::fs::read_dir(dir.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Writes through to a directory until the `fail_at`-th write.
    struct FailingAfter {
        inner: LocalOutputStorage,
        writes: AtomicUsize,
        fail_at: usize,
    }

    #[async_trait]
    impl OutputStorage for FailingAfter {
        async fn write(&self, file_name: &str, content: &[u8]) -> Result<PathBuf, ExportError> {
            if self.writes.fetch_add(1, Ordering::SeqCst) + 1 >= self.fail_at {
                return Err(ExportError::io("disk full"));
            }
            self.inner.write(file_name, content).await
        }

        async fn remove(&self, file_name: &str) -> Result<(), ExportError> {
            self.inner.remove(file_name).await
        }
    }

    fn command(formats: Vec<ExportFormat>) -> ExportDocumentsCommand {
        ExportDocumentsCommand {
            snapshot: snapshot(),
            formats,
            date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
        }
    }

    #[test]
    fn sanitize_replaces_unsafe_runs() {
        assert_eq!(
            sanitize_file_stem("Reforma do Refeitório / Bloco A"),
            "Reforma_do_Refeitório_Bloco_A"
        );
        assert_eq!(sanitize_file_stem("  ../  "), FALLBACK_OBJECT);
        assert_eq!(sanitize_file_stem("a:b"), "a_b");
    }

    #[tokio::test]
    async fn writes_memorial_budget_dfd_and_etp() {
        let dir = TempDir::new().unwrap();
        let mut workflow = ArtifactWorkflow::new();

        let result = handler(&dir)
            .handle(command(vec![ExportFormat::Markdown, ExportFormat::Html]), &mut workflow)
            .await
            .unwrap();

        let names: Vec<String> = result
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "Memorial_Reforma_do_Refeitório_Bloco_A.md",
                "Memorial_Reforma_do_Refeitório_Bloco_A.html",
                "Orcamento_Reforma_do_Refeitório_Bloco_A.xlsx",
                "DFD-Documento_Formalizacao_Demanda.md",
                "DFD-Documento_Formalizacao_Demanda.html",
                "ETP-Estudo_Tecnico_Preliminar.md",
                "ETP-Estudo_Tecnico_Preliminar.html",
            ]
        );
        assert_eq!(result.aggregate.total_general, Money::new(850.0));
        assert!(workflow.etp().is_some());
        assert!(result.files.iter().all(|p| p.exists()));
    }

    #[tokio::test]
    async fn edited_dfd_for_same_snapshot_is_kept() {
        let dir = TempDir::new().unwrap();
        let mut workflow = ArtifactWorkflow::new();
        let cmd = command(vec![ExportFormat::Markdown]);
        workflow.generate_dfd(&cmd.snapshot);
        workflow
            .edit_dfd(|d| d.sector = "Seção de Logística".to_string())
            .unwrap();

        handler(&dir).handle(cmd, &mut workflow).await.unwrap();

        let dfd = std::fs::read_to_string(dir.path().join("DFD-Documento_Formalizacao_Demanda.md"))
            .unwrap();
        assert!(dfd.contains("Seção de Logística"));
    }

    #[tokio::test]
    async fn pdf_without_pandoc_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let handler = ExportDocumentsHandler::new(
            Arc::new(PulldownExportService::new().with_pandoc_path("/nonexistent/pandoc")),
            Arc::new(XlsxBudgetExporter::new()),
            Arc::new(LocalOutputStorage::new(dir.path())),
            OrganizationHeader::default(),
        );

        let err = handler
            .handle(command(vec![ExportFormat::Pdf]), &mut ArtifactWorkflow::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportDocumentsError::Export(ExportError::ServiceUnavailable(_))));
        assert!(file_names(&dir).is_empty());
    }

    #[tokio::test]
    async fn markdown_with_failing_pdf_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let handler = ExportDocumentsHandler::new(
            Arc::new(PulldownExportService::new().with_pandoc_path("/nonexistent/pandoc")),
            Arc::new(XlsxBudgetExporter::new()),
            Arc::new(LocalOutputStorage::new(dir.path())),
            OrganizationHeader::default(),
        );

        let result = handler
            .handle(
                command(vec![ExportFormat::Markdown, ExportFormat::Pdf]),
                &mut ArtifactWorkflow::new(),
            )
            .await;

        assert!(result.is_err());
        assert!(file_names(&dir).is_empty(), "left files: {:?}", file_names(&dir));
    }

    #[tokio::test]
    async fn failed_write_removes_files_already_written() {
        let dir = TempDir::new().unwrap();
        let handler = ExportDocumentsHandler::new(
            Arc::new(PulldownExportService::new()),
            Arc::new(XlsxBudgetExporter::new()),
            Arc::new(FailingAfter {
                inner: LocalOutputStorage::new(dir.path()),
                writes: AtomicUsize::new(0),
                fail_at: 3,
            }),
            OrganizationHeader::default(),
        );

        let err = handler
            .handle(command(vec![ExportFormat::Markdown]), &mut ArtifactWorkflow::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportDocumentsError::Export(ExportError::Io(_))));
        assert!(file_names(&dir).is_empty(), "left files: {:?}", file_names(&dir));
    }

    #[tokio::test]
    async fn repeated_formats_are_written_once() {
        let dir = TempDir::new().unwrap();

        let result = handler(&dir)
            .handle(
                command(vec![ExportFormat::Markdown, ExportFormat::Html, ExportFormat::Markdown]),
                &mut ArtifactWorkflow::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.files.len(), 7);
        assert_eq!(file_names(&dir).len(), 7);
    }

    #[test]
    fn unique_formats_keeps_first_request_order() {
        assert_eq!(
            unique_formats(&[ExportFormat::Pdf, ExportFormat::Markdown, ExportFormat::Pdf]),
            vec![ExportFormat::Pdf, ExportFormat::Markdown]
        );
    }
}
