use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use memorial_descritivo::adapters::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueOverrideStore, LocalOutputStorage,
    PdfPriceExtractor, ProjectFile, PulldownExportService, TextPriceExtractor, XlsxBudgetExporter,
};
use memorial_descritivo::application::{
    BuildProjectHandler, CatalogStore, ExportDocumentsCommand, ExportDocumentsHandler,
    UpdateCatalogCommand, UpdateCatalogHandler,
};
use memorial_descritivo::config::{AppConfig, StorageBackend};
use memorial_descritivo::domain::artifacts::ArtifactWorkflow;
use memorial_descritivo::domain::catalog::CatalogQuery;
use memorial_descritivo::domain::foundation::Percentage;
use memorial_descritivo::ports::{ExportFormat, KeyValueStore, PriceExtractor};
use memorial_descritivo::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "memorial",
    version,
    about = "Memorial descritivo, orçamento, DFD e ETP a partir do catálogo CDHU"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the effective catalog
    Catalog {
        #[arg(long, help = "Filter by code or description")]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Apply prices from a CDHU bulletin (PDF or text dump)
    UpdateCatalog { file: PathBuf },
    /// Drop all price overrides
    ResetCatalog,
    /// Generate memorial, budget, DFD and ETP from a project file
    Generate {
        project: PathBuf,
        #[arg(long, help = "Output directory (defaults to the configured one)")]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_values_t = [FormatArg::Md])]
        format: Vec<FormatArg>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Md,
    Html,
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Md => ExportFormat::Markdown,
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    telemetry::init_tracing(&config.logging)?;

    let catalog = Arc::new(open_catalog(&config).await);

    match cli.command {
        Commands::Catalog { search, category } => list_catalog(&catalog, search, category).await,
        Commands::UpdateCatalog { file } => update_catalog(&config, catalog, &file).await,
        Commands::ResetCatalog => {
            let event = catalog.reset().await.context("Failed to reset catalog")?;
            println!("Catálogo restaurado: {}", event.version);
            Ok(())
        }
        Commands::Generate {
            project,
            out,
            format,
        } => generate(&config, catalog, &project, out, format).await,
    }
}

async fn open_catalog(config: &AppConfig) -> CatalogStore {
    let kv: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.storage.data_dir)),
        StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
    };
    CatalogStore::open(Arc::new(KeyValueOverrideStore::new(kv))).await
}

async fn list_catalog(
    catalog: &CatalogStore,
    search: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let mut query = CatalogQuery::all();
    if let Some(search) = search {
        query = query.with_search(search);
    }
    if let Some(category) = category {
        query = query.with_category(category);
    }

    match catalog.overrides().await {
        Some(overrides) => println!(
            "Base: {} (atualizada em {})",
            overrides.version_label(),
            overrides.date().format_br_date()
        ),
        None => println!("Base: {}", catalog.version_label().await),
    }
    for item in catalog.query(&query).await {
        println!(
            "{}  {:<60}  {:<4}  {}",
            item.code,
            item.description,
            item.unit,
            item.price.format_brl()
        );
    }
    Ok(())
}

async fn update_catalog(config: &AppConfig, catalog: Arc<CatalogStore>, file: &Path) -> Result<()> {
    let document = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let is_pdf = file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    let extractor: Arc<dyn PriceExtractor> = if is_pdf {
        Arc::new(
            PdfPriceExtractor::new()
                .with_max_pages(config.extraction.max_pages)
                .with_version_scan_pages(config.extraction.version_scan_pages),
        )
    } else {
        Arc::new(TextPriceExtractor::new(config.extraction.version_scan_pages))
    };

    let (progress_tx, mut progress_rx) = watch::channel(Percentage::ZERO);
    let progress_task = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            eprint!("\rProcessando... {}", *progress_rx.borrow());
        }
        eprintln!();
    });

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let cancel_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancellation requested");
            cancel_tx.send_replace(true);
        }
    });

    let handler = UpdateCatalogHandler::new(extractor, catalog);
    let command = UpdateCatalogCommand {
        document,
        received_on: Local::now().date_naive(),
    };
    let result = handler.handle(command, &progress_tx, cancel_rx).await;

    cancel_task.abort();
    drop(progress_tx);
    let _ = progress_task.await;

    match result {
        Ok(result) => {
            println!("{} preços atualizados ({})", result.updated, result.version);
            Ok(())
        }
        Err(err) => {
            let message = err.user_message();
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

async fn generate(
    config: &AppConfig,
    catalog: Arc<CatalogStore>,
    project: &Path,
    out: Option<PathBuf>,
    formats: Vec<FormatArg>,
) -> Result<()> {
    let file = ProjectFile::load(project).await?;
    let snapshot = match BuildProjectHandler::new(catalog).handle(file).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            let message = err.user_message();
            return Err(anyhow::Error::new(err).context(message));
        }
    };

    let mut export_service =
        PulldownExportService::new().with_pdf_timeout(config.export.pdf_timeout_secs);
    if let Some(pandoc) = &config.export.pandoc_path {
        export_service = export_service.with_pandoc_path(pandoc.clone());
    }
    let output_dir = out.unwrap_or_else(|| config.export.output_dir.clone());
    let handler = ExportDocumentsHandler::new(
        Arc::new(export_service),
        Arc::new(XlsxBudgetExporter::new()),
        Arc::new(LocalOutputStorage::new(&output_dir)),
        config.organization.header(),
    );

    let command = ExportDocumentsCommand {
        snapshot,
        formats: formats.into_iter().map(ExportFormat::from).collect(),
        date: Local::now().date_naive(),
    };

    let mut workflow = ArtifactWorkflow::new();
    let result = match handler.handle(command, &mut workflow).await {
        Ok(result) => result,
        Err(err) => {
            let message = err.user_message();
            return Err(anyhow::Error::new(err).context(message));
        }
    };

    info!(dir = %output_dir.display(), "Export finished");
    for path in &result.files {
        println!("{}", path.display());
    }
    println!(
        "Material: {}  Mão de obra: {}  Total geral: {}",
        result.aggregate.total_material.format_brl(),
        result.aggregate.total_labor.format_brl(),
        result.aggregate.total_general.format_brl()
    );
    Ok(())
}
