//! `WeatherBuddy` - professional weather intelligence
//!
//! This library provides the core functionality for fetching weather
//! reports, deriving professional scoring heuristics (commute impact,
//! workability, travel risk, clothing advice), threshold alerts, and a
//! scripted assistant.

pub mod alerts;
pub mod api;
pub mod assistant;
pub mod cache;
pub mod config;
pub mod demo;
pub mod error;
pub mod insights;
pub mod logging;
pub mod models;
pub mod recommendations;
pub mod service;
pub mod web;

// Re-export core types for public API
pub use alerts::{AlertBook, CustomAlert};
pub use api::{GeocodingResult, WeatherApiClient};
pub use config::WeatherBuddyConfig;
pub use error::WeatherBuddyError;
pub use insights::ProfessionalReport;
pub use models::{Location, WeatherReport};
pub use service::{LocationQuery, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherBuddyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
