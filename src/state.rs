//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the backend handle, the UI indicators, the auth store and the
//! image-table allowlist. Everything is cheap to clone.

use std::sync::Arc;

use crate::auth::AuthStore;
use crate::stores::UiState;
use crate::supabase::Backend;

/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub ui: Arc<UiState>,
    pub auth: AuthStore,
    /// Tables the image loader may read. `None` permits any valid identifier.
    pub image_tables: Option<Arc<[String]>>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Backend, image_tables: Option<Vec<String>>) -> Self {
        Self {
            backend,
            ui: Arc::new(UiState::new()),
            auth: AuthStore::new(),
            image_tables: image_tables.map(Arc::from),
        }
    }

    #[must_use]
    pub fn permits_table(&self, table: &str) -> bool {
        self.image_tables
            .as_ref()
            .map_or(true, |tables| tables.iter().any(|t| t == table))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
