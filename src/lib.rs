//! Agricultural alert generation from multi-variable weather forecasts.
//!
//! Per-variable forecast series are merged into [`models::ForecastDay`]
//! records by [`logic::aggregate()`], then classified into dated, severity-ranked
//! [`models::AlertEvent`]s by [`logic::AlertEngine`].

pub mod config;
pub mod error;
pub mod export;
pub mod logic;
pub mod models;

pub use error::{CropWatchError, Result};
