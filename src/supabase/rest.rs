//! Reqwest client for the PostgREST and Storage surfaces of a Supabase project.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;

use super::auth::{AuthProvider, GoTrueClient};
use super::query::SelectQuery;
use super::{BackendError, SupabaseApi, error_message_from_body};

#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    #[error("missing Supabase URL")]
    MissingUrl,
    #[error("missing Supabase anon key")]
    MissingKey,
    #[error("invalid Supabase URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("HTTP client build failed: {0}")]
    HttpClient(String),
}

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
    auth: Arc<GoTrueClient>,
}

impl SupabaseClient {
    /// # Errors
    ///
    /// Returns an error if either value is blank, the URL is not an absolute
    /// `http(s)` URL, or the HTTP client cannot be built.
    pub fn new(url: &str, anon_key: &str, timeout: Duration) -> Result<Self, ClientInitError> {
        let url = url.trim();
        let anon_key = anon_key.trim();
        if url.is_empty() {
            return Err(ClientInitError::MissingUrl);
        }
        if anon_key.is_empty() {
            return Err(ClientInitError::MissingKey);
        }

        let base_url =
            Url::parse(url).map_err(|e| ClientInitError::InvalidUrl { url: url.to_owned(), reason: e.to_string() })?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientInitError::InvalidUrl { url: url.to_owned(), reason: "expected an http(s) URL".into() });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientInitError::HttpClient(e.to_string()))?;
        let auth = Arc::new(GoTrueClient::new(http.clone(), base_url.clone(), anon_key.to_owned()));

        Ok(Self { http, base_url, anon_key: anon_key.to_owned(), auth })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Attach `apikey` and a bearer token: the signed-in user's access token
    /// when there is one, else the anon key.
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .auth
            .access_token()
            .unwrap_or_else(|| self.anon_key.clone());
        req.header("apikey", &self.anon_key).bearer_auth(bearer)
    }
}

/// Append path segments to `base`, percent-encoding each one.
pub(crate) fn endpoint<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, BackendError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| BackendError::Request(format!("base URL cannot take a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turn a non-success response into [`BackendError::Api`].
pub(crate) async fn check_status(resp: Response) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Api { status: status.as_u16(), message: error_message_from_body(&body) })
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: Option<String>,
}

#[async_trait::async_trait]
impl SupabaseApi for SupabaseClient {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<serde_json::Value>, BackendError> {
        let url = endpoint(&self.base_url, ["rest", "v1", query.table_name()])?;
        let req = self
            .http
            .get(url)
            .query(&query.query_pairs())
            .header("Accept", "application/json");

        let resp = check_status(self.authorize(req).send().await?).await?;
        // PostgREST answers `[]` for no rows; treat a bare `null` the same way.
        let rows: Option<Vec<serde_json::Value>> = resp.json().await?;
        Ok(rows.unwrap_or_default())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        let segments = ["storage", "v1", "object", bucket]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let url = endpoint(&self.base_url, segments)?;
        let req = self
            .http
            .post(url)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(body);

        let resp = check_status(self.authorize(req).send().await?).await?;
        let uploaded: UploadResponse = resp.json().await?;
        Ok(uploaded
            .key
            .unwrap_or_else(|| format!("{bucket}/{}", path.trim_matches('/'))))
    }

    fn auth(&self) -> Arc<dyn AuthProvider> {
        Arc::clone(&self.auth) as Arc<dyn AuthProvider>
    }
}

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;
