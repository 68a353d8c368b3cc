//! Element templates CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use element_templates::catalog::{CatalogHttp, MarketplaceCatalog, MetadataCatalog};
use element_templates::provider::TemplateProvider;
use element_templates::store::TemplateStore;
use element_templates::sync::{FixedPlatformVersion, SyncOrchestrator, SyncRun};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "element-templates", version, about)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the templates available to a diagram file.
    Resolve {
        /// Diagram file path. Omit for an unsaved diagram.
        diagram: Option<PathBuf>,

        /// Bundled default search paths.
        #[arg(long = "default-path")]
        default_paths: Vec<PathBuf>,
    },

    /// Run one sync pass against a metadata catalog.
    Sync {
        /// Catalog URL.
        #[arg(long, env = "ELEMENT_TEMPLATES_CATALOG_URL")]
        catalog_url: String,

        /// Current execution platform version.
        #[arg(long, default_value = "8.8")]
        platform_version: String,

        /// Store file. Defaults to the user data directory.
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Run one sync pass against a marketplace listing.
    SyncMarketplace {
        /// Listing URL.
        #[arg(long, env = "ELEMENT_TEMPLATES_LISTING_URL")]
        listing_url: String,

        /// Base URL for per-item detail requests.
        #[arg(long)]
        item_base_url: String,

        /// Current execution platform version.
        #[arg(long, default_value = "8.8")]
        platform_version: String,

        /// Store file. Defaults to the user data directory.
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("element_templates=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("element_templates=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn run_orchestrator(mut orchestrator: SyncOrchestrator) -> anyhow::Result<()> {
    match orchestrator.trigger()? {
        SyncRun::Completed(outcome) => {
            for warning in &outcome.warnings {
                tracing::warn!("{}", warning);
            }
            println!(
                "sync complete: has_new={} warnings={}",
                outcome.has_new,
                outcome.warnings.len()
            );
        }
        SyncRun::Dropped => println!("sync dropped: cooling down"),
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Resolve {
            diagram,
            default_paths,
        } => {
            let provider = TemplateProvider::new(default_paths);
            let templates = provider.templates_for(diagram.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&templates)?);
            Ok(())
        }
        Commands::Sync {
            catalog_url,
            platform_version,
            store,
        } => {
            let store = TemplateStore::new(
                store.unwrap_or_else(|| TemplateStore::default_path("element-templates.json")),
            );
            let source = MetadataCatalog::new(
                "execution-platform templates",
                catalog_url,
                CatalogHttp::new(),
            );
            run_orchestrator(SyncOrchestrator::new(
                Box::new(source),
                store,
                Box::new(FixedPlatformVersion(platform_version)),
            ))
        }
        Commands::SyncMarketplace {
            listing_url,
            item_base_url,
            platform_version,
            store,
        } => {
            let store = TemplateStore::new(
                store.unwrap_or_else(|| TemplateStore::default_path("connector-templates.json")),
            );
            let source = MarketplaceCatalog::new(
                "connector templates",
                listing_url,
                item_base_url,
                CatalogHttp::new(),
            );
            run_orchestrator(SyncOrchestrator::new(
                Box::new(source),
                store,
                Box::new(FixedPlatformVersion(platform_version)),
            ))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
