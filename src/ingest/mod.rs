//! Retrieval of the two raw documents for one entity.

mod cache;
mod error;
mod http;

use std::fmt;

use tracing::info;

use crate::model::{SentimentDataset, TranscriptCollection};

pub use cache::CacheSource;
pub use error::IngestionError;
pub use http::HttpSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Sentiment,
    Transcripts,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::Transcripts => "transcripts",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment.json",
            Self::Transcripts => "transcripts.json",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Sentiment => "analysis",
            Self::Transcripts => "getTranscripts",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where raw documents come from.
pub trait DocumentSource {
    fn describe(&self) -> String;

    async fn fetch(&self, entity: &str, document: DocumentKind) -> Result<Vec<u8>, IngestionError>;
}

/// Both documents exactly as the source returned them.
#[derive(Debug, Clone)]
pub struct RawDocuments {
    pub sentiment: Vec<u8>,
    pub transcripts: Vec<u8>,
}

impl RawDocuments {
    pub fn parse(&self) -> Result<(SentimentDataset, TranscriptCollection), IngestionError> {
        let dataset = serde_json::from_slice(&self.sentiment).map_err(|source| {
            IngestionError::Parse {
                document: DocumentKind::Sentiment,
                source,
            }
        })?;
        let transcripts = serde_json::from_slice(&self.transcripts).map_err(|source| {
            IngestionError::Parse {
                document: DocumentKind::Transcripts,
                source,
            }
        })?;
        Ok((dataset, transcripts))
    }
}

/// Issues both fetches concurrently and joins them. The first failure
/// cancels the other request and is returned alone.
pub async fn fetch_documents<S: DocumentSource>(
    source: &S,
    entity: &str,
) -> Result<RawDocuments, IngestionError> {
    info!(entity, source = %source.describe(), "fetching documents");

    let (sentiment, transcripts) = tokio::try_join!(
        source.fetch(entity, DocumentKind::Sentiment),
        source.fetch(entity, DocumentKind::Transcripts),
    )?;

    info!(
        entity,
        sentiment_bytes = sentiment.len(),
        transcript_bytes = transcripts.len(),
        "fetched documents"
    );

    Ok(RawDocuments {
        sentiment,
        transcripts,
    })
}
