use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::fetch::MANIFEST_FILE;
use crate::ingest::{CacheSource, DocumentKind};
use crate::model::FetchManifest;
use crate::util::sha256_file;

pub fn run(args: StatusArgs) -> Result<()> {
    let cache = CacheSource::new(&args.cache_root);
    let manifest_path = cache.entity_dir(&args.entity).join(MANIFEST_FILE);

    info!(cache_root = %cache.root().display(), entity = %args.entity, "status requested");

    let manifest = if manifest_path.exists() {
        let raw = fs::read(&manifest_path)
            .with_context(|| format!("failed to read {}", manifest_path.display()))?;
        let manifest: FetchManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

        info!(
            entity = %manifest.entity,
            fetched_at = %manifest.fetched_at,
            base_url = %manifest.base_url,
            quarters = manifest.quarter_count,
            transitions = manifest.transition_count,
            transcripts = manifest.transcript_count,
            "loaded fetch manifest"
        );
        Some(manifest)
    } else {
        warn!(path = %manifest_path.display(), "fetch manifest missing");
        None
    };

    for document in [DocumentKind::Sentiment, DocumentKind::Transcripts] {
        let path = cache.document_path(&args.entity, document);
        if !path.exists() {
            warn!(path = %path.display(), %document, "cached document missing");
            continue;
        }

        let sha256 = sha256_file(&path)?;
        let recorded = manifest.as_ref().map(|manifest| match document {
            DocumentKind::Sentiment => manifest.sentiment.sha256.as_str(),
            DocumentKind::Transcripts => manifest.transcripts.sha256.as_str(),
        });

        match recorded {
            Some(expected) if expected != sha256 => warn!(
                path = %path.display(),
                %document,
                expected,
                actual = %sha256,
                "cached document changed since fetch"
            ),
            _ => info!(
                path = %path.display(),
                %document,
                sha256 = %sha256,
                "cached document present"
            ),
        }
    }

    Ok(())
}
