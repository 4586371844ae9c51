//! json-server compatible HTTP adapter.

use crate::kernel::services::ports::{RemoteError, RemoteFileService, RemoteFuture, RemoteResult};
use crate::models::{FileRecord, RecordId, RecordPatch};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct HttpFileService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFileService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                tracing::error!(error = %err, "failed to build HTTP client, using defaults");
                reqwest::Client::new()
            });
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.base_url)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}/files/{}", self.base_url, id)
    }
}

async fn read_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    url: &str,
) -> RemoteResult<T> {
    let resp = request
        .send()
        .await
        .map_err(|e| RemoteError::Transport(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(RemoteError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    resp.json::<T>()
        .await
        .map_err(|e| RemoteError::Decode(e.to_string()))
}

impl RemoteFileService for HttpFileService {
    fn list(&self) -> RemoteFuture<'_, Vec<FileRecord>> {
        Box::pin(async move {
            let url = self.files_url();
            let records: Vec<FileRecord> = read_json(self.client.get(&url), &url).await?;
            tracing::debug!(count = records.len(), url = %url, "listed records");
            Ok(records)
        })
    }

    fn create(&self, record: FileRecord) -> RemoteFuture<'_, FileRecord> {
        Box::pin(async move {
            let url = self.files_url();
            let created: FileRecord = read_json(self.client.post(&url).json(&record), &url).await?;
            tracing::debug!(id = %created.id, url = %url, "created record");
            Ok(created)
        })
    }

    fn update(&self, id: RecordId, patch: RecordPatch) -> RemoteFuture<'_, FileRecord> {
        Box::pin(async move {
            let url = self.record_url(&id);
            match read_json(self.client.patch(&url).json(&patch), &url).await {
                Err(RemoteError::Status { status: 404, .. }) => Err(RemoteError::NotFound(id)),
                other => other,
            }
        })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/http.rs"]
mod tests;
