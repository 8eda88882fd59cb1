use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, SyncError};

/// HTTP client scoped to one API: base URL plus bearer auth on every request.
/// Non-2xx responses are logged with their body and surfaced as [`ApiError`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self, SyncError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| SyncError::Config("API key contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| SyncError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| transport(Method::GET, &url, source))?;
        parse(Method::GET, url, response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| transport(Method::POST, &url, source))?;
        parse(Method::POST, url, response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .http
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| transport(Method::PUT, &url, source))?;
        parse(Method::PUT, url, response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|source| transport(Method::DELETE, &url, source))?;
        parse(Method::DELETE, url, response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn transport(method: Method, url: &str, source: reqwest::Error) -> ApiError {
    tracing::error!("No response received: {method} {url}: {source}");
    ApiError::Transport {
        method,
        url: url.to_string(),
        source,
    }
}

async fn parse<T: DeserializeOwned>(
    method: Method,
    url: String,
    response: Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Request failed: {method} {url} returned {status}");
        if !body.is_empty() {
            tracing::error!("Response body: {body}");
        }
        return Err(ApiError::Status {
            method,
            url,
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|source| transport(method, &url, source))
}
