//! Supabase backend handle.
//!
//! DESIGN
//! ======
//! `Backend` is a capability-checked handle: either `Configured` with a live
//! client behind the [`SupabaseApi`] seam, or `Unconfigured` carrying the
//! reason construction failed. Construction never propagates an error, so a
//! misconfigured environment still boots. Every call on the unconfigured
//! variant fails with [`BackendError::NotConfigured`] instead of pretending
//! to succeed.

pub mod auth;
pub mod query;
pub mod rest;

use std::sync::Arc;
use std::time::Duration;

use auth::AuthProvider;
use query::SelectQuery;
use rest::SupabaseClient;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Supabase not configured")]
    NotConfigured,

    #[error("invalid table name: {0:?}")]
    InvalidTable(String),

    #[error("table not permitted: {0}")]
    TableNotPermitted(String),

    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status. `message` is the
    /// service's own explanation when the body carried one.
    #[error("service error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("response decode failed: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() { Self::Decode(e.to_string()) } else { Self::Request(e.to_string()) }
    }
}

/// Pull the human-readable message out of a PostgREST, GoTrue or Storage
/// error body.
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// API SEAM
// =============================================================================

/// Operations the app needs from a configured Supabase project.
#[async_trait::async_trait]
pub trait SupabaseApi: Send + Sync {
    /// Run a select and return the raw JSON rows.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the request fails or the service rejects it.
    async fn select(&self, query: &SelectQuery) -> Result<Vec<serde_json::Value>, BackendError>;

    /// Store `body` at `bucket/path`, returning the stored object key.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the request fails or the service rejects it.
    async fn upload(&self, bucket: &str, path: &str, body: Vec<u8>, content_type: &str)
    -> Result<String, BackendError>;

    fn auth(&self) -> Arc<dyn AuthProvider>;
}

// =============================================================================
// BACKEND HANDLE
// =============================================================================

#[derive(Clone)]
pub enum Backend {
    Configured(Arc<dyn SupabaseApi>),
    Unconfigured { reason: String },
}

impl Backend {
    /// Build a handle from the project URL and anonymous key.
    ///
    /// Never fails: construction errors are logged and produce
    /// [`Backend::Unconfigured`].
    #[must_use]
    pub fn connect(url: &str, anon_key: &str, timeout: Duration) -> Self {
        match SupabaseClient::new(url, anon_key, timeout) {
            Ok(client) => {
                tracing::info!(url = %client.base_url(), "Supabase client initialized");
                Self::Configured(Arc::new(client))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize Supabase client");
                Self::Unconfigured { reason: e.to_string() }
            }
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    fn api(&self) -> Result<&Arc<dyn SupabaseApi>, BackendError> {
        match self {
            Self::Configured(api) => Ok(api),
            Self::Unconfigured { .. } => Err(BackendError::NotConfigured),
        }
    }

    /// Validate and run a select.
    ///
    /// # Errors
    ///
    /// [`BackendError::InvalidTable`] for unsafe identifiers,
    /// [`BackendError::NotConfigured`] on the unconfigured handle, otherwise
    /// whatever the client reports.
    pub async fn select(&self, query: &SelectQuery) -> Result<Vec<serde_json::Value>, BackendError> {
        query.validate()?;
        self.api()?.select(query).await
    }

    /// Upload an object to storage.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotConfigured`] on the unconfigured handle, otherwise
    /// whatever the client reports.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BackendError> {
        self.api()?.upload(bucket, path, body, content_type).await
    }

    /// Auth provider of a configured project, `None` when unconfigured.
    #[must_use]
    pub fn auth(&self) -> Option<Arc<dyn AuthProvider>> {
        self.api().ok().map(|api| api.auth())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
