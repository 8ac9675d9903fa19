//! ChEMBL molecule documents via the EBI Elasticsearch proxy.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ChemblError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Could not decode JSON ({source}); raw response: {body}")]
    Decode {
        source: serde_json::Error,
        body: String,
    },
}

/// Client for fetching single ChEMBL molecule documents.
pub struct ChemblClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChemblClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: "https://www.ebi.ac.uk/chembl/interface_api/es_proxy/es_data".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn molecule_url(&self, chembl_id: &str) -> String {
        format!(
            "{}/get_es_document/chembl_molecule/{chembl_id}\
             ?source=_metadata.compound_generated.image_file%2Cmolecule_structures",
            self.base_url
        )
    }

    /// Fetches the image metadata and structures of one molecule.
    pub async fn fetch_molecule(&self, chembl_id: &str) -> Result<Value, ChemblError> {
        let url = self.molecule_url(chembl_id);
        debug!("GET {url}");

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        serde_json::from_str(&body).map_err(|source| ChemblError::Decode { source, body })
    }
}

impl Default for ChemblClient {
    fn default() -> Self {
        Self::new()
    }
}
