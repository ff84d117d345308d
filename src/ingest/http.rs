use std::time::Duration;

use tracing::{debug, warn};

use super::{DocumentKind, DocumentSource, IngestionError};

/// Analysis service reached over HTTP.
///
/// Documents live at `{base_url}/analysis/{entity}` and
/// `{base_url}/getTranscripts/{entity}`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn document_url(&self, entity: &str, document: DocumentKind) -> String {
        format!("{}/{}/{}", self.base_url, document.endpoint(), entity)
    }
}

impl DocumentSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch(&self, entity: &str, document: DocumentKind) -> Result<Vec<u8>, IngestionError> {
        let url = self.document_url(entity, document);
        debug!(%url, %document, "requesting document");

        let transport = |source| IngestionError::Transport {
            document,
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "document request rejected");
            return Err(IngestionError::Status {
                document,
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }
}
