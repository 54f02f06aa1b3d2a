//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own query construction and result shaping so route
//! handlers can stay focused on request parsing and status codes.

pub mod images;
