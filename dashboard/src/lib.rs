//! Hatchery Dashboard client
//!
//! A thin client over the hatchery REST backend: configuration, the API
//! client, the editable-grid controller shared by every table, and the
//! page services that bind them together.

pub mod api;
pub mod config;
pub mod error;
pub mod grid;
pub mod services;

pub use api::ApiClient;
pub use config::Config;
pub use error::{DashboardError, DashboardResult};
pub use grid::{CellSaver, CellStatus, CellValue, CommitOutcome, EditableGrid};
