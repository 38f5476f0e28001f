//! Themed - Theme storage REST daemon
//!
//! Provides:
//! - CRUD over named theme documents stored in SQLite
//! - Icon registry lookup and markup rendering
//! - Health reporting

pub mod api;
pub mod config;
pub mod store;

pub use api::{router, ApiError, AppState};
pub use config::ThemedConfig;
pub use store::{StoreError, ThemeRecord, ThemeStore};
