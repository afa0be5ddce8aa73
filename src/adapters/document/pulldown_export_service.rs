//! Pulldown-cmark based export service adapter.
//!
//! - HTML conversion using pulldown-cmark (pure Rust)
//! - PDF conversion using Pandoc (requires an external Pandoc installation)

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::ports::{DocumentExportService, ExportError};

/// Default Pandoc timeout in seconds.
pub const DEFAULT_PDF_TIMEOUT_SECS: u64 = 30;

const FALLBACK_TITLE: &str = "Documento";

/// Export service using pulldown-cmark for HTML and Pandoc for PDF.
///
/// If Pandoc is not available, PDF conversion returns `ServiceUnavailable`
/// and HTML export keeps working.
///
/// # Example
///
/// ```rust,ignore
/// let service = PulldownExportService::new().with_pdf_timeout(60);
/// let html = service.to_html("# MEMORIAL DESCRITIVO\n\nTexto").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PulldownExportService {
    /// Path to pandoc executable. If None, searches PATH.
    pandoc_path: Option<String>,

    pdf_timeout_secs: u64,

    include_default_css: bool,
}

impl Default for PulldownExportService {
    fn default() -> Self {
        Self {
            pandoc_path: None,
            pdf_timeout_secs: DEFAULT_PDF_TIMEOUT_SECS,
            include_default_css: true,
        }
    }
}

/// Pandoc flags for an A4 pt-BR document.
const PANDOC_PDF_ARGS: [&str; 12] = [
    "--from=markdown",
    "--to=pdf",
    "--pdf-engine=xelatex",
    "--variable",
    "geometry:a4paper,margin=2cm",
    "--variable",
    "fontsize=12pt",
    "--variable",
    "lang=pt-BR",
    "--variable",
    "mainfont=Times New Roman",
    "--quiet",
];

impl PulldownExportService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pandoc executable to run instead of the one on `PATH`.
    pub fn with_pandoc_path(self, path: impl Into<String>) -> Self {
        Self {
            pandoc_path: Some(path.into()),
            ..self
        }
    }

    pub fn with_pdf_timeout(self, timeout_secs: u64) -> Self {
        Self {
            pdf_timeout_secs: timeout_secs,
            ..self
        }
    }

    pub fn without_default_css(self) -> Self {
        Self {
            include_default_css: false,
            ..self
        }
    }

    fn pandoc(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or("pandoc")
    }

    fn page(&self, body: &str, title: &str) -> String {
        let style = if self.include_default_css { DEFAULT_CSS } else { "" };
        let mut page = String::with_capacity(body.len() + style.len() + 256);
        page.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
        page.push_str("<meta charset=\"UTF-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_text(title)));
        page.push_str(&format!("<style>{}</style>\n", style));
        page.push_str("</head>\n<body>\n<article class=\"documento\">\n");
        page.push_str(body);
        page.push_str("</article>\n</body>\n</html>\n");
        page
    }

    async fn pandoc_runs(&self) -> bool {
        Command::new(self.pandoc())
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn run_pandoc(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        let mut child = Command::new(self.pandoc())
            .args(PANDOC_PDF_ARGS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::pdf_failed(format!("cannot start {}: {}", self.pandoc(), e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExportError::pdf_failed("Pandoc stdin unavailable"))?;
        stdin
            .write_all(markdown.as_bytes())
            .await
            .map_err(|e| ExportError::pdf_failed(format!("cannot feed Pandoc: {}", e)))?;
        // Pandoc reads until EOF.
        drop(stdin);

        let limit = Duration::from_secs(self.pdf_timeout_secs);
        let output = match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| ExportError::pdf_failed(e.to_string()))?,
            Err(_) => return Err(ExportError::Timeout(self.pdf_timeout_secs)),
        };

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(ExportError::pdf_failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ))
        }
    }
}

/// Text of the first `# ` heading.
fn document_title(markdown: &str) -> String {
    markdown
        .lines()
        .find_map(|line| line.trim().strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[async_trait]
impl DocumentExportService for PulldownExportService {
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError> {
        if !self.pandoc_runs().await {
            return Err(ExportError::service_unavailable(format!(
                "no working Pandoc at '{}'",
                self.pandoc()
            )));
        }
        let pdf = self.run_pandoc(markdown).await?;
        debug!(bytes = pdf.len(), "Pandoc produced PDF");
        Ok(pdf)
    }

    async fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        let mut body = String::with_capacity(markdown.len() * 2);
        html::push_html(
            &mut body,
            Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH),
        );
        Ok(self.page(&body, &document_title(markdown)))
    }

    async fn is_available(&self) -> bool {
        self.pandoc_runs().await
    }
}

/// Serif, justified A4 layout of the printed documents.
const DEFAULT_CSS: &str = r#"
@page {
    size: A4;
    margin: 2cm;
}

body {
    font-family: 'Times New Roman', Georgia, serif;
    font-size: 12pt;
    line-height: 1.5;
    color: #111827;
    max-width: 21cm;
    margin: 0 auto;
}

.documento {
    padding: 1cm;
}

.documento > p:first-child {
    text-align: center;
    text-transform: uppercase;
}

h1 {
    text-align: center;
    font-size: 16pt;
    text-transform: uppercase;
    margin: 1.5em 0 1em;
}

h2 {
    font-size: 13pt;
    text-transform: uppercase;
    border-bottom: 1px solid #9ca3af;
    margin-top: 1.5em;
}

h3 {
    font-size: 12pt;
    margin-top: 1.25em;
}

p, li {
    text-align: justify;
}

hr {
    border: none;
    margin: 3em 0 1em;
}

@media print {
    .documento {
        padding: 0;
    }

    h1, h2, h3 {
        page-break-after: avoid;
    }

    li, p {
        page-break-inside: avoid;
    }
}
"#;

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
