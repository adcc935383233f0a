//! Hourly/daily forecast entries and the assembled weather report

use super::{CurrentConditions, WeatherKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a report's data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    /// Fetched from the upstream weather API
    Live,
    /// Built-in demo dataset substituted after a failure
    Demo,
}

/// One hourly forecast entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HourlyEntry {
    /// Timestamp of this forecast slot
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Display condition
    pub condition: WeatherKind,
    /// Precipitation chance percentage (0-100)
    pub precipitation_chance: u8,
    /// Wind speed in km/h
    pub wind_speed: f32,
    /// Weather condition icon slug
    pub icon: String,
}

impl HourlyEntry {
    /// Format the slot time as "HH:MM"
    #[must_use]
    pub fn format_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// One daily forecast entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailyEntry {
    /// Calendar date
    pub date: NaiveDate,
    /// Day name ("Today", "Tomorrow", then the weekday)
    pub day_name: String,
    /// Daily high in Celsius
    pub high: f32,
    /// Daily low in Celsius
    pub low: f32,
    /// Display condition
    pub condition: WeatherKind,
    /// Human-readable description
    pub description: String,
    /// Precipitation chance percentage (0-100)
    pub precipitation_chance: u8,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_speed: f32,
    /// Weather condition icon slug
    pub icon: String,
}

/// Format a day name by its offset in the daily list
#[must_use]
pub fn day_label(offset: usize, date: NaiveDate) -> String {
    match offset {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%A").to_string(),
    }
}

/// A complete weather report: current conditions plus hourly and
/// daily outlooks for one location.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReport {
    /// Display name of the location
    pub location: String,
    /// Current conditions
    pub current: CurrentConditions,
    /// Hourly outlook (next ~10 hours)
    pub hourly: Vec<HourlyEntry>,
    /// Daily outlook (up to 5 days)
    pub daily: Vec<DailyEntry>,
    /// When this report was assembled
    pub retrieved_at: DateTime<Utc>,
    /// Live or demo data
    pub source: ReportSource,
}

impl WeatherReport {
    /// Today's daily entry, when present
    #[must_use]
    pub fn today(&self) -> Option<&DailyEntry> {
        self.daily.first()
    }

    /// Today's precipitation chance, defaulting to 0 when the daily
    /// outlook is empty
    #[must_use]
    pub fn precipitation_chance(&self) -> u8 {
        self.today().map_or(0, |d| d.precipitation_chance)
    }

    /// Whether this report was substituted from the demo dataset
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.source == ReportSource::Demo
    }

    /// Re-label the report with a caller-supplied location name
    #[must_use]
    pub fn with_location(mut self, location: String) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_label() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 29).unwrap(); // a Wednesday
        assert_eq!(day_label(0, date), "Today");
        assert_eq!(day_label(1, date), "Tomorrow");
        assert_eq!(day_label(2, date), "Wednesday");
    }
}
