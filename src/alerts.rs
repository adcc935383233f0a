//! Custom threshold alerts
//!
//! Users register alerts on a watched parameter (temperature, wind,
//! precipitation, humidity, pressure, UV) with an above/below/equals
//! trigger. The registry is in-memory and session-scoped; nothing is
//! persisted.

use crate::models::WeatherReport;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Weather parameters an alert can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertParameter {
    Temperature,
    Wind,
    Precipitation,
    Humidity,
    Pressure,
    Uv,
}

/// Trigger comparison for an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTrigger {
    Above,
    Below,
    Equals,
}

/// A registered alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomAlert {
    /// Registry-assigned identifier
    pub id: u64,
    /// User-facing name
    pub name: String,
    /// Watched parameter
    pub parameter: AlertParameter,
    /// Trigger comparison
    pub trigger: AlertTrigger,
    /// Threshold value in the parameter's display unit
    pub threshold: f32,
    /// Inactive alerts never fire
    pub active: bool,
    /// Location substrings this alert is scoped to (empty = everywhere)
    pub locations: Vec<String>,
}

/// Alert fields supplied by the caller; the registry assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertSpec {
    pub name: String,
    pub parameter: AlertParameter,
    pub trigger: AlertTrigger,
    pub threshold: f32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub locations: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl CustomAlert {
    /// Current value of the watched parameter in a report
    #[must_use]
    pub fn observed_value(&self, report: &WeatherReport) -> f32 {
        let current = &report.current;
        match self.parameter {
            AlertParameter::Temperature => current.temperature,
            AlertParameter::Wind => current.wind_speed,
            AlertParameter::Precipitation => f32::from(report.precipitation_chance()),
            AlertParameter::Humidity => f32::from(current.humidity),
            AlertParameter::Pressure => current.pressure as f32,
            AlertParameter::Uv => current.uv_index,
        }
    }

    /// Whether this alert is scoped to the report's location
    #[must_use]
    pub fn applies_to(&self, location: &str) -> bool {
        if self.locations.is_empty() {
            return true;
        }
        let location = location.to_lowercase();
        self.locations
            .iter()
            .any(|scoped| location.contains(&scoped.to_lowercase()))
    }

    /// Evaluate this alert against a report
    #[must_use]
    pub fn fires_on(&self, report: &WeatherReport) -> bool {
        if !self.active || !self.applies_to(&report.location) {
            return false;
        }
        let value = self.observed_value(report);
        match self.trigger {
            AlertTrigger::Above => value > self.threshold,
            AlertTrigger::Below => value < self.threshold,
            AlertTrigger::Equals => (value - self.threshold).abs() < f32::EPSILON,
        }
    }
}

/// In-memory alert registry
#[derive(Debug, Default)]
pub struct AlertBook {
    alerts: RwLock<Vec<CustomAlert>>,
    next_id: AtomicU64,
}

impl AlertBook {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<CustomAlert>> {
        match self.alerts.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<CustomAlert>> {
        match self.alerts.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register a new alert and return it with its assigned id
    pub fn add(&self, spec: AlertSpec) -> CustomAlert {
        let alert = CustomAlert {
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            name: spec.name,
            parameter: spec.parameter,
            trigger: spec.trigger,
            threshold: spec.threshold,
            active: spec.active,
            locations: spec.locations,
        };
        self.write().push(alert.clone());
        alert
    }

    /// All registered alerts
    #[must_use]
    pub fn list(&self) -> Vec<CustomAlert> {
        self.read().clone()
    }

    /// Replace an alert's fields, keeping its id
    pub fn update(&self, id: u64, spec: AlertSpec) -> Option<CustomAlert> {
        let mut alerts = self.write();
        let alert = alerts.iter_mut().find(|a| a.id == id)?;
        alert.name = spec.name;
        alert.parameter = spec.parameter;
        alert.trigger = spec.trigger;
        alert.threshold = spec.threshold;
        alert.active = spec.active;
        alert.locations = spec.locations;
        Some(alert.clone())
    }

    /// Remove an alert; returns whether one was removed
    pub fn remove(&self, id: u64) -> bool {
        let mut alerts = self.write();
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        alerts.len() != before
    }

    /// Flip an alert's active flag
    pub fn toggle(&self, id: u64) -> Option<CustomAlert> {
        let mut alerts = self.write();
        let alert = alerts.iter_mut().find(|a| a.id == id)?;
        alert.active = !alert.active;
        Some(alert.clone())
    }

    /// Alerts that fire against a report
    #[must_use]
    pub fn check(&self, report: &WeatherReport) -> Vec<CustomAlert> {
        self.read()
            .iter()
            .filter(|a| a.fires_on(report))
            .cloned()
            .collect()
    }
}
