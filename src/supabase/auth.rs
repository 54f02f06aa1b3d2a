//! GoTrue auth client: password sign-in, sign-out, session lookup and
//! auth-change notifications.
//!
//! DESIGN
//! ======
//! The client owns the current session. Every transition (sign-in, refresh,
//! sign-out) is published on a broadcast channel so observers such as
//! [`crate::auth::AuthStore`] can follow along without polling.
//!
//! TRADE-OFFS
//! ==========
//! Sessions live in process memory only. A restart starts signed out, which
//! fits a server that signs in on demand rather than persisting tokens.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::BackendError;
use super::rest::{check_status, endpoint};

const AUTH_EVENT_CAPACITY: usize = 16;

/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(10);

// =============================================================================
// TYPES
// =============================================================================

/// Identity record supplied by the auth provider. Only the attributes the
/// app reads are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds from issue.
    pub expires_in: u64,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// One auth-state notification. `session` is `None` after sign-out.
#[derive(Debug, Clone)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

// =============================================================================
// PROVIDER SEAM
// =============================================================================

#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session, if any. May refresh an expired session first.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if a needed refresh fails at the transport level.
    async fn get_session(&self) -> Result<Option<Session>, BackendError>;

    /// Register for auth-change notifications. Dropping the receiver unsubscribes.
    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthChange>;

    /// # Errors
    ///
    /// Returns [`BackendError::Api`] for rejected credentials, or a transport error.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// Clear the local session. The server-side logout is best effort.
    ///
    /// # Errors
    ///
    /// Returns the server-side logout failure, after the local session is cleared.
    async fn sign_out(&self) -> Result<(), BackendError>;
}

// =============================================================================
// GOTRUE CLIENT
// =============================================================================

struct StoredSession {
    session: Session,
    expires_at: Instant,
}

impl StoredSession {
    fn new(session: Session) -> Self {
        let lifetime = Duration::from_secs(session.expires_in).saturating_sub(EXPIRY_MARGIN);
        Self { expires_at: Instant::now() + lifetime, session }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
    session: RwLock<Option<StoredSession>>,
    events: broadcast::Sender<AuthChange>,
}

impl GoTrueClient {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: Url, anon_key: String) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self { http, base_url, anon_key, session: RwLock::new(None), events }
    }

    /// Access token of the current session, expired or not.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map(|s| s.session.access_token.clone())
    }

    fn replace_session(&self, session: Option<Session>, event: AuthEvent) {
        {
            let mut slot = self
                .session
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            *slot = session.clone().map(StoredSession::new);
        }
        // No receivers is fine: nobody is observing yet.
        let _ = self.events.send(AuthChange { event, session });
    }

    async fn request_token(&self, grant_type: &str, body: serde_json::Value) -> Result<Session, BackendError> {
        let url = endpoint(&self.base_url, ["auth", "v1", "token"])?;
        let resp = self
            .http
            .post(url)
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&body)
            .send()
            .await?;
        Ok(check_status(resp).await?.json::<Session>().await?)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Option<Session>, BackendError> {
        match self
            .request_token("refresh_token", serde_json::json!({ "refresh_token": refresh_token }))
            .await
        {
            Ok(session) => {
                self.replace_session(Some(session.clone()), AuthEvent::TokenRefreshed);
                Ok(Some(session))
            }
            // The provider rejected the refresh token: the session is gone.
            Err(BackendError::Api { status, message }) => {
                tracing::warn!(status, message = message.as_deref().unwrap_or(""), "session refresh rejected");
                self.replace_session(None, AuthEvent::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl AuthProvider for GoTrueClient {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        let expired_refresh = {
            let slot = self
                .session
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            match slot.as_ref() {
                None => return Ok(None),
                Some(stored) if !stored.is_expired() => return Ok(Some(stored.session.clone())),
                Some(stored) => stored.session.refresh_token.clone(),
            }
        };
        self.refresh(&expired_refresh).await
    }

    fn on_auth_state_change(&self) -> broadcast::Receiver<AuthChange> {
        self.events.subscribe()
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let session = self
            .request_token("password", serde_json::json!({ "email": email, "password": password }))
            .await?;
        self.replace_session(Some(session.clone()), AuthEvent::SignedIn);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let Some(token) = self.access_token() else {
            return Ok(());
        };
        self.replace_session(None, AuthEvent::SignedOut);

        let url = endpoint(&self.base_url, ["auth", "v1", "logout"])?;
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;
        check_status(resp).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
