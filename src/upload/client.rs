use crate::upload::types::{FileSource, SelectedFile, ServerReply};
use reqwest::multipart::{Form, Part};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unrecognized server reply: {0}")]
    BadReply(#[from] serde_json::Error),
    #[error("failed to read {name}: {source}")]
    FileRead {
        name: String,
        source: std::io::Error,
    },
}

/// Thin HTTP client for the ledger server's two upload endpoints.
///
/// The server signals outcomes in the JSON body rather than the HTTP
/// status code, so replies are decoded unconditionally.
#[derive(Clone)]
pub struct UploadClient {
    base_url: String,
    http: reqwest::Client,
}

impl UploadClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Reads the file's bytes and posts them as the multipart field
    /// `file` to `/upload`.
    pub async fn upload(&self, file: &SelectedFile) -> Result<ServerReply, UploadError> {
        let bytes = read_contents(file).await?;

        let part = Part::bytes(bytes).file_name(file.name.clone());
        let form = Form::new().part("file", part);

        let body = self
            .http
            .post(format!("{}/upload", self.base_url))
            .multipart(form)
            .send()
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Second-phase request: asks the server to proceed with an upload it
    /// flagged, identified by the filename and content hash it returned.
    pub async fn confirm_upload(
        &self,
        filename: &str,
        file_hash: &str,
    ) -> Result<ServerReply, UploadError> {
        let form = Form::new()
            .text("filename", filename.to_string())
            .text("file_hash", file_hash.to_string());

        let body = self
            .http
            .post(format!("{}/confirm_upload", self.base_url))
            .multipart(form)
            .send()
            .await?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}

async fn read_contents(file: &SelectedFile) -> Result<Vec<u8>, UploadError> {
    match &file.source {
        FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        FileSource::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| UploadError::FileRead {
                    name: file.name.clone(),
                    source,
                })
        }
    }
}
