//! Thin reqwest wrapper over the paste store API.

use serde_json::Value;
use sharebin_core::models::paste::{CreatePasteRequest, Paste};
use std::time::Duration;

use crate::error::StoreError;

/// HTTP client bound to a Sharebin server base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    server: String,
}

impl ApiClient {
    /// Build a client for `server` with the given request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(server: &str, timeout: Duration) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(StoreError::Network)?;
        Ok(Self {
            http,
            server: normalize_server(server),
        })
    }

    /// Normalized server base URL this client talks to.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// `POST /paste/v1/`: persist a new paste, returning the saved record.
    pub async fn create(&self, req: &CreatePasteRequest) -> Result<Paste, StoreError> {
        let url = api_url(&self.server, &["paste", "v1", ""])?;
        let res = self.http.post(url).json(req).send().await?;
        let res = ensure_success(res).await?;
        Ok(res.json().await?)
    }

    /// `GET /paste/v1/{id}`: fetch the full record for `id`.
    pub async fn get(&self, id: &str) -> Result<Paste, StoreError> {
        let url = api_url(&self.server, &["paste", "v1", id])?;
        let res = self.http.get(url).send().await?;
        let res = ensure_success(res).await?;
        Ok(res.json().await?)
    }

    /// `DELETE /paste/v1/{id}`: remove the record for `id`.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = api_url(&self.server, &["paste", "v1", id])?;
        let res = self.http.delete(url).send().await?;
        ensure_success(res).await?;
        Ok(())
    }
}

async fn ensure_success(res: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(StoreError::NotFound);
    }

    let body = res.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message: error_message_for_response(status, &body),
    })
}

fn error_message_for_response(status: reqwest::StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

fn api_url(server: &str, segments: &[&str]) -> Result<reqwest::Url, StoreError> {
    let mut url = reqwest::Url::parse(server)
        .map_err(|err| StoreError::InvalidUrl(format!("'{}': {}", server, err)))?;
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            StoreError::InvalidUrl(format!("'{}' cannot be used as an API base", server))
        })?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

fn normalize_server(server: &str) -> String {
    if let Ok(mut url) = reqwest::Url::parse(server) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return server.to_string();
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    server.to_string()
}
