//! Core library for the `weather-dash` terminal dashboard.
//!
//! This crate defines:
//! - The snapshot model served by the dashboard backend, and a client for it
//! - Derivations over a snapshot (condition tone, advisory tips, comfort
//!   temperature, metric panel readings)
//! - Chart geometry for the forecast and historical plots
//! - The in-memory dashboard session and its bundled fallback data
//! - Configuration handling
//!
//! It is used by `dashboard-cli`, but the derivations are pure and can be
//! reused by any other front end.

pub mod chart;
pub mod codes;
pub mod config;
pub mod dashboard;
pub mod fallback;
pub mod format;
pub mod insights;
pub mod model;
pub mod provider;

pub use config::Config;
pub use dashboard::{Dashboard, SearchOutcome, Ticket};
pub use model::{
    ClimatePoint, CurrentConditions, DayForecast, Historical, HistoricalView, HourPoint, Location,
    ModelOutlookPoint, WeatherSnapshot,
};
pub use provider::{FetchError, WeatherSource};
