//! Commute impact assessment
//!
//! Maps precipitation, wind, visibility and temperature extremes onto a
//! severity level, an expected delay and concrete travel recommendations.

use crate::models::WeatherReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commute severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommuteSeverity {
    Low,
    Moderate,
    High,
    Severe,
}

impl CommuteSeverity {
    /// Capitalized label for display
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for CommuteSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Commute impact assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteImpact {
    /// Overall severity
    pub severity: CommuteSeverity,
    /// Expected extra travel time in minutes
    pub delay_minutes: u32,
    /// One-line summary
    pub description: String,
    /// Travel recommendations
    pub recommendations: Vec<String>,
    /// Route classes expected to be affected
    pub affected_routes: Vec<String>,
}

impl CommuteImpact {
    /// Assess commute impact from a weather report
    #[must_use]
    pub fn assess(report: &WeatherReport) -> Self {
        let current = &report.current;
        let mut severity = CommuteSeverity::Low;
        let mut delay_minutes: u32 = 0;
        let mut recommendations = Vec::new();
        let mut affected_routes = Vec::new();

        // Precipitation impact only applies when it is actually raining
        // or snowing right now
        if current.condition.is_rainy() || current.condition.is_snowy() {
            let precipitation = report.precipitation_chance();
            if precipitation > 70 {
                severity = CommuteSeverity::Severe;
                delay_minutes = 45;
                recommendations.push("Consider working from home if possible".to_string());
                recommendations.push("Allow 45+ minutes extra travel time".to_string());
                affected_routes.push("All major highways".to_string());
                affected_routes.push("Public transportation".to_string());
            } else if precipitation > 40 {
                severity = CommuteSeverity::High;
                delay_minutes = 25;
                recommendations.push("Leave 25-30 minutes earlier".to_string());
                recommendations.push("Check traffic updates before leaving".to_string());
            } else if precipitation > 15 {
                severity = CommuteSeverity::Moderate;
                delay_minutes = 15;
                recommendations.push("Allow extra 15 minutes for commute".to_string());
            }
        }

        // Wind impact
        if current.wind_speed > 40.0 {
            if severity == CommuteSeverity::Low {
                severity = CommuteSeverity::High;
            }
            delay_minutes = delay_minutes.max(20);
            recommendations.push("Avoid bridges and elevated highways".to_string());
            recommendations.push("Secure loose items in vehicle".to_string());
            affected_routes.push("Bridges".to_string());
            affected_routes.push("Elevated highways".to_string());
        }

        // Visibility
        if current.visibility < 5.0 {
            severity = CommuteSeverity::High;
            delay_minutes = delay_minutes.max(30);
            recommendations.push("Drive with headlights on".to_string());
            recommendations.push("Maintain safe following distance".to_string());
        }

        // Temperature extremes
        if current.temperature < -10.0 || current.temperature > 40.0 {
            if severity == CommuteSeverity::Low {
                severity = CommuteSeverity::Moderate;
            }
            recommendations.push("Allow extra time for vehicle warm-up/cool-down".to_string());
        }

        CommuteImpact {
            severity,
            delay_minutes,
            description: format!("{} impact expected on commute", severity.label()),
            recommendations,
            affected_routes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_report;
    use crate::models::{WeatherKind, WeatherReport};
    use rstest::rstest;

    fn rainy_report(precipitation: u8) -> WeatherReport {
        let mut report = demo_report();
        report.current.condition = WeatherKind::Rain;
        if let Some(today) = report.daily.first_mut() {
            today.precipitation_chance = precipitation;
        }
        report
    }

    #[rstest]
    #[case(0, CommuteSeverity::Low, 0)]
    #[case(15, CommuteSeverity::Low, 0)]
    #[case(16, CommuteSeverity::Moderate, 15)]
    #[case(40, CommuteSeverity::Moderate, 15)]
    #[case(41, CommuteSeverity::High, 25)]
    #[case(70, CommuteSeverity::High, 25)]
    #[case(71, CommuteSeverity::Severe, 45)]
    #[case(100, CommuteSeverity::Severe, 45)]
    fn test_precipitation_thresholds(
        #[case] precipitation: u8,
        #[case] expected: CommuteSeverity,
        #[case] delay: u32,
    ) {
        let impact = CommuteImpact::assess(&rainy_report(precipitation));
        assert_eq!(impact.severity, expected);
        assert_eq!(impact.delay_minutes, delay);
    }

    #[test]
    fn test_precipitation_ignored_when_dry() {
        let mut report = demo_report();
        report.current.condition = WeatherKind::Sunny;
        if let Some(today) = report.daily.first_mut() {
            today.precipitation_chance = 90;
        }
        let impact = CommuteImpact::assess(&report);
        assert_eq!(impact.severity, CommuteSeverity::Low);
        assert_eq!(impact.delay_minutes, 0);
    }

    #[test]
    fn test_strong_wind_raises_low_to_high() {
        let mut report = demo_report();
        report.current.condition = WeatherKind::Sunny;
        report.current.wind_speed = 45.0;
        let impact = CommuteImpact::assess(&report);
        assert_eq!(impact.severity, CommuteSeverity::High);
        assert_eq!(impact.delay_minutes, 20);
        assert!(impact.affected_routes.contains(&"Bridges".to_string()));
    }

    #[test]
    fn test_wind_does_not_downgrade_severe() {
        let mut report = rainy_report(80);
        report.current.wind_speed = 45.0;
        let impact = CommuteImpact::assess(&report);
        assert_eq!(impact.severity, CommuteSeverity::Severe);
        assert_eq!(impact.delay_minutes, 45);
    }

    #[test]
    fn test_poor_visibility_forces_high() {
        let mut report = demo_report();
        report.current.visibility = 3.0;
        let impact = CommuteImpact::assess(&report);
        assert_eq!(impact.severity, CommuteSeverity::High);
        assert!(impact.delay_minutes >= 30);
    }

    #[test]
    fn test_temperature_extremes_raise_low_to_moderate() {
        let mut report = demo_report();
        report.current.temperature = -15.0;
        report.current.visibility = 16.0;
        let impact = CommuteImpact::assess(&report);
        assert_eq!(impact.severity, CommuteSeverity::Moderate);
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        let mut report = demo_report();
        report.current.temperature = f32::NEG_INFINITY;
        report.current.wind_speed = f32::MAX;
        report.current.visibility = f32::NAN;
        let impact = CommuteImpact::assess(&report);
        assert!(!impact.description.is_empty());
    }

    #[test]
    fn test_description_carries_severity() {
        let impact = CommuteImpact::assess(&rainy_report(90));
        assert_eq!(impact.description, "Severe impact expected on commute");
    }
}
