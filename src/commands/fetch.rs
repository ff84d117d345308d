use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::{FetchArgs, SourceArgs};
use crate::commands::session::runtime;
use crate::engine::assemble;
use crate::ingest::{CacheSource, DocumentKind, HttpSource, RawDocuments, fetch_documents};
use crate::model::{CachedDocument, FetchManifest};
use crate::util::{now_utc_string, sha256_bytes, write_bytes_atomic, write_json_pretty};

pub const MANIFEST_FILE: &str = "fetch_manifest.json";

pub fn run(args: FetchArgs) -> Result<()> {
    let FetchArgs { source: options, dry_run } = args;
    let source = HttpSource::new(required_base_url(&options)?, options.timeout())
        .context("failed to build HTTP client")?;
    let entity = options.entity.as_str();
    let raw = runtime()?
        .block_on(fetch_documents(&source, entity))
        .with_context(|| format!("failed to fetch documents for {entity}"))?;

    let cache = CacheSource::new(&options.cache_root);
    let manifest = build_manifest(&cache, entity, source.base_url(), &raw)?;

    if dry_run {
        info!(
            entity = %manifest.entity,
            quarters = manifest.quarter_count,
            transitions = manifest.transition_count,
            transcripts = manifest.transcript_count,
            "fetch dry-run complete"
        );
        return Ok(());
    }

    write_documents(&cache, entity, &raw)?;
    let manifest_path = cache.entity_dir(entity).join(MANIFEST_FILE);
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote fetch manifest");
    info!(
        entity = %manifest.entity,
        quarters = manifest.quarter_count,
        transitions = manifest.transition_count,
        "fetch completed"
    );

    Ok(())
}

fn required_base_url(options: &SourceArgs) -> Result<&str> {
    options
        .base_url
        .as_deref()
        .context("fetch requires --base-url or EARNINGS_BASE_URL")
}

/// Validates both documents end to end before anything is cached, so a
/// document the engine would reject never replaces a good one.
pub fn build_manifest(
    cache: &CacheSource,
    entity: &str,
    base_url: &str,
    raw: &RawDocuments,
) -> Result<FetchManifest> {
    let (dataset, transcripts) = raw.parse().context("fetched documents are invalid")?;
    let quarter_count = dataset.signals.len();
    let transition_count = dataset.qoq_tone_change.len();
    let transcript_count = transcripts.len();

    match dataset.signals.first_key() {
        Some(quarter) => {
            assemble(&dataset, &transcripts, quarter)
                .context("fetched sentiment document is unusable")?;
        }
        None => warn!(entity, "fetched sentiment document declares no quarters"),
    }

    Ok(FetchManifest {
        manifest_version: 1,
        entity: entity.to_string(),
        fetched_at: now_utc_string(),
        base_url: base_url.to_string(),
        quarter_count,
        transition_count,
        transcript_count,
        sentiment: describe_document(
            &cache.document_path(entity, DocumentKind::Sentiment),
            &raw.sentiment,
        ),
        transcripts: describe_document(
            &cache.document_path(entity, DocumentKind::Transcripts),
            &raw.transcripts,
        ),
    })
}

fn describe_document(path: &Path, data: &[u8]) -> CachedDocument {
    CachedDocument {
        path: path.display().to_string(),
        sha256: sha256_bytes(data),
        bytes: data.len(),
    }
}

/// Each document is replaced atomically, and the manifest is written only
/// after both. A failure between the two document writes leaves the cache
/// out of step with the previous manifest, which `status` reports as drift.
fn write_documents(cache: &CacheSource, entity: &str, raw: &RawDocuments) -> Result<()> {
    for (document, data) in [
        (DocumentKind::Sentiment, &raw.sentiment),
        (DocumentKind::Transcripts, &raw.transcripts),
    ] {
        let path = cache.document_path(entity, document);
        write_bytes_atomic(&path, data)?;
        info!(path = %path.display(), %document, bytes = data.len(), "cached document");
    }
    Ok(())
}
