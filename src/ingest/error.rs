use std::path::PathBuf;

use super::DocumentKind;

/// Failures reported by a document source. Any of these aborts the whole
/// fetch; the engine never sees a partial session.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("{document} request to {url} returned HTTP {status}")]
    Status {
        document: DocumentKind,
        url: String,
        status: u16,
    },
    #[error("{document} request to {url} failed: {source}")]
    Transport {
        document: DocumentKind,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {document} document {}: {source}", path.display())]
    Io {
        document: DocumentKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {document} document: {source}")]
    Parse {
        document: DocumentKind,
        #[source]
        source: serde_json::Error,
    },
}
