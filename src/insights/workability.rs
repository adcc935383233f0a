//! Outdoor workability scoring
//!
//! A 0-100 score built by subtracting penalty weights for temperature,
//! wind, precipitation and visibility from a baseline of 100, with the
//! penalty per factor recorded for display.

use crate::models::WeatherReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workability categories derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkabilityCategory {
    Excellent,
    Good,
    Fair,
    Poor,
    Hazardous,
}

impl WorkabilityCategory {
    /// Category for a clamped 0-100 score
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=100 => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            20..=39 => Self::Poor,
            _ => Self::Hazardous,
        }
    }

    /// Capitalized label for display
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for WorkabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Penalty recorded per factor (zero when the factor is benign)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkabilityFactors {
    pub temperature: i32,
    pub wind_chill: i32,
    pub heat_index: i32,
    pub precipitation: i32,
    pub wind: i32,
    pub visibility: i32,
}

/// Outdoor workability assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkabilityScore {
    /// Score from 0 (hazardous) to 100 (ideal)
    pub score: u8,
    /// Category derived from the score
    pub category: WorkabilityCategory,
    /// Penalty breakdown
    pub factors: WorkabilityFactors,
    /// Working recommendations accumulated alongside the penalties
    pub recommendations: Vec<String>,
}

impl WorkabilityScore {
    /// Score outdoor workability from a weather report
    #[must_use]
    pub fn assess(report: &WeatherReport) -> Self {
        let current = &report.current;
        let mut score: i32 = 100;
        let mut factors = WorkabilityFactors::default();
        let mut recommendations = Vec::new();

        // Temperature factor
        if current.temperature < 0.0 {
            factors.temperature = -30;
            recommendations.push("Extreme cold - limit outdoor exposure".to_string());
            recommendations.push("Wear insulated protective gear".to_string());
        } else if current.temperature < 5.0 {
            factors.temperature = -20;
            recommendations.push("Cold conditions - dress warmly".to_string());
        } else if current.temperature > 35.0 {
            factors.temperature = -25;
            recommendations.push("Extreme heat - take frequent breaks".to_string());
            recommendations.push("Stay hydrated and seek shade".to_string());
        } else if current.temperature > 30.0 {
            factors.temperature = -15;
            recommendations.push("Hot conditions - limit strenuous activity".to_string());
        }
        score += factors.temperature;

        // Wind factor
        if current.wind_speed > 50.0 {
            factors.wind = -40;
            recommendations.push("Dangerous wind conditions - avoid outdoor work".to_string());
        } else if current.wind_speed > 30.0 {
            factors.wind = -20;
            recommendations.push("Strong winds - secure equipment and materials".to_string());
        } else if current.wind_speed > 20.0 {
            factors.wind = -10;
            recommendations
                .push("Moderate winds - be cautious with lightweight materials".to_string());
        }
        score += factors.wind;

        // Precipitation factor
        let precipitation = report.precipitation_chance();
        if precipitation > 80 {
            factors.precipitation = -35;
            recommendations
                .push("Heavy precipitation - postpone outdoor work if possible".to_string());
        } else if precipitation > 50 {
            factors.precipitation = -20;
            recommendations.push("Moderate precipitation - use protective covers".to_string());
        } else if precipitation > 20 {
            factors.precipitation = -10;
            recommendations.push("Light precipitation expected - have backup plans".to_string());
        }
        score += factors.precipitation;

        // Visibility factor
        if current.visibility < 2.0 {
            factors.visibility = -30;
            recommendations.push("Poor visibility - use additional lighting".to_string());
        } else if current.visibility < 5.0 {
            factors.visibility = -15;
            recommendations.push("Reduced visibility - exercise extra caution".to_string());
        }
        score += factors.visibility;

        let score = score.clamp(0, 100) as u8;
        let category = WorkabilityCategory::from_score(score);

        WorkabilityScore {
            score,
            category,
            factors,
            recommendations,
        }
    }
}
