use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::cli::SourceArgs;
use crate::engine::Dashboard;
use crate::ingest::{CacheSource, HttpSource, RawDocuments, fetch_documents};

pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Fetches both documents from the service when `--base-url` is set and
/// from the cache otherwise.
pub fn fetch_raw(args: &SourceArgs) -> Result<RawDocuments> {
    let runtime = runtime()?;

    let raw = match &args.base_url {
        Some(base_url) => {
            let source = HttpSource::new(base_url, args.timeout())
                .context("failed to build HTTP client")?;
            runtime.block_on(fetch_documents(&source, &args.entity))
        }
        None => {
            let source = CacheSource::new(&args.cache_root);
            runtime.block_on(fetch_documents(&source, &args.entity))
        }
    };

    raw.with_context(|| format!("failed to load documents for {}", args.entity))
}

pub fn load_dashboard(args: &SourceArgs) -> Result<Dashboard> {
    let raw = fetch_raw(args)?;
    let (dataset, transcripts) = raw
        .parse()
        .with_context(|| format!("failed to parse documents for {}", args.entity))?;

    info!(
        entity = %args.entity,
        quarters = dataset.signals.len(),
        transitions = dataset.qoq_tone_change.len(),
        transcripts = transcripts.len(),
        "loaded session"
    );
    if transcripts.is_empty() {
        warn!(entity = %args.entity, "transcript document is empty");
    }

    Dashboard::new(dataset, transcripts)
        .with_context(|| format!("failed to derive series for {}", args.entity))
}

/// Caller-side default: the first declared quarter when none is requested.
pub fn resolve_quarter<'a>(
    dashboard: &'a Dashboard,
    requested: Option<&'a str>,
) -> Result<&'a str> {
    match requested {
        Some(quarter) => Ok(quarter),
        None => dashboard
            .default_quarter()
            .context("sentiment document declares no quarters"),
    }
}
