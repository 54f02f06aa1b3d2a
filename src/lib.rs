//! Image gallery service backed by a Supabase project.
//!
//! ARCHITECTURE
//! ============
//! `routes` translates HTTP into calls on `services`, which query the
//! project through the `supabase` backend handle. `auth` and `stores` hold
//! the process-wide observables; `theme` is static styling data.

pub mod auth;
pub mod config;
pub mod routes;
pub mod services;
pub mod state;
pub mod stores;
pub mod supabase;
pub mod theme;
