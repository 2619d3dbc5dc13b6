use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};

use crate::models::{ApplicationInput, ApplicationRecord, RecordId};
use crate::{log_error, log_info};

use super::{RecordStore, SyncError};

const ENABLE_LOGS: bool = true;

/// Record Store reached over HTTP/JSON.
#[derive(Clone)]
pub struct HttpRecordStore {
    base_url: String,
    client: Client,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{id}` with the id percent-encoded as one path segment.
    fn url_for(&self, id: &RecordId) -> Result<Url, SyncError> {
        let mut url = Url::parse(&self.base_url).map_err(|err| {
            SyncError::Invalid(format!("invalid Record Store URL '{}': {err}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                SyncError::Invalid(format!(
                    "Record Store URL '{}' cannot take a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

/// Turns a non-success response into a `SyncError::Server`, reading the
/// body for a message.
async fn ensure_success(response: Response) -> Result<Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    Err(SyncError::from_response(status.as_u16(), &body))
}

fn logged<T>(method: &str, target: &str, result: Result<T, SyncError>) -> Result<T, SyncError> {
    match &result {
        Ok(_) => log_info!("{method} {target} ok"),
        Err(err) => log_error!("{method} {target} failed: {err}"),
    }
    result
}

impl HttpRecordStore {
    async fn fetch_list(&self) -> Result<Vec<ApplicationRecord>, SyncError> {
        let response = self.client.get(&self.base_url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<Vec<ApplicationRecord>>().await?)
    }

    async fn fetch_one(&self, url: &Url) -> Result<Option<ApplicationRecord>, SyncError> {
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        Ok(Some(response.json::<ApplicationRecord>().await?))
    }

    async fn send_write(&self, request: RequestBuilder) -> Result<(), SyncError> {
        let response = request.send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

impl RecordStore for HttpRecordStore {
    async fn list(&self) -> Result<Vec<ApplicationRecord>, SyncError> {
        logged("GET", &self.base_url, self.fetch_list().await)
    }

    async fn get(&self, id: &RecordId) -> Result<Option<ApplicationRecord>, SyncError> {
        let url = self.url_for(id)?;
        logged("GET", url.as_str(), self.fetch_one(&url).await)
    }

    async fn create(&self, input: &ApplicationInput) -> Result<(), SyncError> {
        let request = self.client.post(&self.base_url).json(input);
        logged("POST", &self.base_url, self.send_write(request).await)
    }

    async fn update(&self, id: &RecordId, input: &ApplicationInput) -> Result<(), SyncError> {
        let url = self.url_for(id)?;
        let request = self.client.put(url.clone()).json(input);
        logged("PUT", url.as_str(), self.send_write(request).await)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), SyncError> {
        let url = self.url_for(id)?;
        let request = self.client.delete(url.clone());
        logged("DELETE", url.as_str(), self.send_write(request).await)
    }
}
