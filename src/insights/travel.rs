//! Travel risk assessment
//!
//! Classifies flight delay risk, road conditions and public transport
//! impact from the current conditions and today's precipitation chance.

use crate::models::{WeatherKind, WeatherReport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flight delay risk levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightDelayRisk {
    Low,
    Moderate,
    High,
}

/// Road condition classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadConditions {
    Excellent,
    Good,
    Fair,
    Poor,
    Hazardous,
}

/// Public transport impact classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitImpact {
    Minimal,
    Moderate,
    Significant,
    Severe,
}

impl fmt::Display for FlightDelayRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Moderate => write!(f, "Moderate"),
            Self::High => write!(f, "High"),
        }
    }
}

impl fmt::Display for RoadConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Poor => write!(f, "Poor"),
            Self::Hazardous => write!(f, "Hazardous"),
        }
    }
}

impl fmt::Display for TransitImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "Minimal"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Significant => write!(f, "Significant"),
            Self::Severe => write!(f, "Severe"),
        }
    }
}

/// Travel impact assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelImpact {
    /// Risk of flight delays
    pub flight_delay_risk: FlightDelayRisk,
    /// Road condition class
    pub road_conditions: RoadConditions,
    /// Public transport impact class
    pub public_transport_impact: TransitImpact,
    /// Travel recommendations
    pub recommendations: Vec<String>,
}

impl TravelImpact {
    /// Assess travel impact from a weather report
    #[must_use]
    pub fn assess(report: &WeatherReport) -> Self {
        let current = &report.current;
        let condition = current.condition;
        let mut flight_delay_risk = FlightDelayRisk::Low;
        let mut road_conditions = RoadConditions::Excellent;
        let mut public_transport_impact = TransitImpact::Minimal;
        let mut recommendations = Vec::new();

        // Flight delay risk
        if matches!(condition, WeatherKind::Thunderstorm) || current.wind_speed > 40.0 {
            flight_delay_risk = FlightDelayRisk::High;
            recommendations.push("Check flight status frequently".to_string());
            recommendations.push("Consider travel insurance".to_string());
        } else if condition.is_rainy() || condition.is_snowy() {
            flight_delay_risk = FlightDelayRisk::Moderate;
            recommendations.push("Arrive at airport early".to_string());
        }

        // Road conditions
        if condition.is_snowy() || current.temperature < 0.0 {
            road_conditions = RoadConditions::Poor;
            recommendations.push("Use winter tires or chains".to_string());
            recommendations.push("Drive slowly and maintain safe distance".to_string());
        } else if condition.is_rainy() && report.precipitation_chance() > 50 {
            road_conditions = RoadConditions::Fair;
            recommendations.push("Reduce speed in wet conditions".to_string());
        }

        // Public transport impact
        if condition.is_snowy() || current.wind_speed > 30.0 {
            public_transport_impact = TransitImpact::Significant;
            recommendations.push("Check public transport updates".to_string());
            recommendations.push("Have alternative transport options ready".to_string());
        } else if condition.is_rainy() {
            public_transport_impact = TransitImpact::Moderate;
            recommendations.push("Allow extra time for delays".to_string());
        }

        TravelImpact {
            flight_delay_risk,
            road_conditions,
            public_transport_impact,
            recommendations,
        }
    }
}
