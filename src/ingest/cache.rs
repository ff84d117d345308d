use std::path::{Path, PathBuf};

use tracing::debug;

use super::{DocumentKind, DocumentSource, IngestionError};

/// Documents previously written by `fetch`, laid out as
/// `{root}/{entity}/sentiment.json` and `{root}/{entity}/transcripts.json`.
#[derive(Debug, Clone)]
pub struct CacheSource {
    root: PathBuf,
}

impl CacheSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn entity_dir(&self, entity: &str) -> PathBuf {
        self.root.join(entity)
    }

    pub fn document_path(&self, entity: &str, document: DocumentKind) -> PathBuf {
        self.entity_dir(entity).join(document.file_name())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for CacheSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, entity: &str, document: DocumentKind) -> Result<Vec<u8>, IngestionError> {
        let path = self.document_path(entity, document);
        debug!(path = %path.display(), %document, "reading cached document");

        tokio::fs::read(&path)
            .await
            .map_err(|source| IngestionError::Io {
                document,
                path,
                source,
            })
    }
}
