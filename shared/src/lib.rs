//! Shared types and models for the Hatchery Dashboard
//!
//! This crate contains the pure domain logic shared between the dashboard
//! client, the WASM bindings, and the report binary: the wire models of the
//! hatchery backend, week-label arithmetic, chick forecasting, and the
//! validators used by the editable tables.

pub mod calendar;
pub mod forecast;
pub mod models;
pub mod types;
pub mod validation;

pub use calendar::*;
pub use forecast::*;
pub use models::*;
pub use types::*;
pub use validation::*;
