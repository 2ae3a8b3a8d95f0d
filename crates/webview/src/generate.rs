//! Generator client
//!
//! Submits a serialized spec to a configured code-generation endpoint and
//! hands back the generated archive. The endpoint is an opaque
//! collaborator; any failure maps to a non-fatal editor notice.

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::{debug, info};

use crate::profile::GeneratorConfig;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generator request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generator returned {status}")]
    Status { status: reqwest::StatusCode },
}

pub struct GeneratorClient {
    http: reqwest::Client,
}

impl Default for GeneratorClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// POST the serialized spec (always JSON, see the editor's generate
    /// flow) and return the generated project archive.
    pub async fn submit(
        &self,
        config: &GeneratorConfig,
        spec_json: String,
    ) -> Result<Vec<u8>, GenerateError> {
        info!(
            component = "generator",
            event = "generate.submit",
            name = %config.name,
            url = %config.url,
            bytes = spec_json.len(),
            "Submitting spec to generator"
        );

        let response = self
            .http
            .post(&config.url)
            .header(CONTENT_TYPE, "application/json")
            .body(spec_json)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Status { status });
        }

        let archive = response.bytes().await?.to_vec();
        debug!(
            component = "generator",
            event = "generate.received",
            bytes = archive.len(),
            "Generator returned archive"
        );
        Ok(archive)
    }
}
