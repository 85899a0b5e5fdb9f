use std::time::Duration;

use reqwest::{header, Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::errors::{with_retry, FalcoriaError, RetryConfig};
use crate::utils::truncation::truncate_error;

/// Connection settings for one backend service.
#[derive(Debug, Clone)]
pub struct ConnectorSettings {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
    pub verify_tls: bool,
}

/// Result of one backend call, tagged by how it ended.
#[derive(Debug)]
pub enum ApiOutcome<T> {
    Ok(T),
    /// The service answered with a non-2xx status.
    Rejected { status: u16, body: String },
    /// The request never produced a response (after retries). Holds either
    /// `Network` or `Timeout`.
    TransportError(FalcoriaError),
}

impl<T> ApiOutcome<T> {
    pub fn into_result(self) -> Result<T, FalcoriaError> {
        match self {
            ApiOutcome::Ok(value) => Ok(value),
            ApiOutcome::Rejected { status, body } => Err(FalcoriaError::Http {
                status,
                body: truncate_error(&body),
            }),
            ApiOutcome::TransportError(err) => Err(err),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiOutcome::Rejected { status: 404, .. })
    }
}

/// Shared HTTP plumbing: bearer auth, per-request timeout and bounded retry
/// of transport failures. HTTP error statuses are never retried.
pub struct BaseConnector {
    client: Client,
    base_url: String,
    retry: RetryConfig,
}

impl BaseConnector {
    pub fn new(settings: &ConnectorSettings) -> Result<Self, FalcoriaError> {
        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {}", settings.token))
            .map_err(|e| FalcoriaError::Profile(format!("Invalid token: {}", e)))?;
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(|e| FalcoriaError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            retry: settings.retry.clone(),
        })
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ApiOutcome<Response> {
        let url = self.url(endpoint);
        debug!(%method, %url, "Backend request");

        let result = with_retry(endpoint, &self.retry, || {
            let mut request = self.client.request(method.clone(), &url);
            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }
            async move { request.send().await.map_err(transport_error) }
        }).await;

        tag_response(result).await
    }

    /// Multipart upload of a single file under the `file` field.
    pub async fn upload(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiOutcome<Response> {
        let url = self.url(endpoint);
        debug!(%url, file_name, size = bytes.len(), "Backend upload");

        let result = with_retry(endpoint, &self.retry, || {
            let part = reqwest::multipart::Part::bytes(bytes.clone()).file_name(file_name.to_string());
            let form = reqwest::multipart::Form::new().part("file", part);
            let request = self.client.post(&url).query(query).multipart(form);
            async move { request.send().await.map_err(transport_error) }
        }).await;

        tag_response(result).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, FalcoriaError> {
        decode_json(self.send(Method::GET, endpoint, query, None).await).await
    }
}

async fn tag_response(result: Result<Response, FalcoriaError>) -> ApiOutcome<Response> {
    match result {
        Ok(resp) if resp.status().is_success() => ApiOutcome::Ok(resp),
        Ok(resp) => {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            ApiOutcome::Rejected { status, body }
        }
        Err(e) => ApiOutcome::TransportError(e),
    }
}

/// Turn a successful response into `T`; failures keep their tag.
pub async fn decode_json<T: DeserializeOwned>(outcome: ApiOutcome<Response>) -> Result<T, FalcoriaError> {
    let resp = outcome.into_result()?;
    let text = resp.text().await
        .map_err(|e| FalcoriaError::Parse(format!("failed to read body: {}", e)))?;
    serde_json::from_str(&text)
        .map_err(|e| FalcoriaError::Parse(format!("{} in {}", e, truncate_error(&text))))
}

fn transport_error(e: reqwest::Error) -> FalcoriaError {
    if e.is_timeout() {
        FalcoriaError::Timeout(e.to_string())
    } else {
        FalcoriaError::Network(e.to_string())
    }
}
