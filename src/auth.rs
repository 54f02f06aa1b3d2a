//! Auth-state store for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route handlers read the store to report who is signed in. The store is
//! fed by one subscription to the auth provider, registered at startup and
//! cancelled at shutdown through [`AuthSubscription`].

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::supabase::auth::{AuthProvider, Session, User};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// The initial session has not resolved yet. Means "unknown", not
    /// "signed out".
    #[default]
    Pending,
    SignedOut,
    SignedIn(User),
}

impl AuthState {
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Self {
        session.map_or(Self::SignedOut, |s| Self::SignedIn(s.user.clone()))
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Pending | Self::SignedOut => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::SignedOut => "signed_out",
            Self::SignedIn(_) => "signed_in",
        }
    }
}

#[derive(Clone)]
pub struct AuthStore {
    tx: Arc<watch::Sender<AuthState>>,
}

impl AuthStore {
    #[must_use]
    pub fn new() -> Self {
        Self { tx: Arc::new(watch::Sender::new(AuthState::Pending)) }
    }

    #[must_use]
    pub fn get(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn set(&self, state: AuthState) {
        self.tx.send_replace(state);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    /// Follow `provider`: resolve the current session once, then overwrite
    /// the state on every auth-change notification.
    ///
    /// The notification receiver is registered before the session fetch
    /// starts, so changes that race the fetch are applied after it.
    #[must_use = "dropping the subscription stops following auth changes"]
    pub fn attach(&self, provider: Arc<dyn AuthProvider>) -> AuthSubscription {
        let mut changes = provider.on_auth_state_change();
        let tx = Arc::clone(&self.tx);

        let handle = tokio::spawn(async move {
            let initial = match provider.get_session().await {
                Ok(session) => AuthState::from_session(session.as_ref()),
                Err(e) => {
                    tracing::warn!(error = %e, "initial session lookup failed");
                    AuthState::SignedOut
                }
            };
            tx.send_replace(initial);

            loop {
                match changes.recv().await {
                    Ok(change) => {
                        tracing::debug!(event = ?change.event, "auth state changed");
                        tx.send_replace(AuthState::from_session(change.session.as_ref()));
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "auth listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        AuthSubscription { handle }
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Live registration with the auth provider. Cancelled on drop.
pub struct AuthSubscription {
    handle: JoinHandle<()>,
}

impl AuthSubscription {
    pub fn cancel(self) {
        drop(self);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
