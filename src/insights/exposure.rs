//! UV exposure and working-conditions guidance

use super::workability::{WorkabilityCategory, WorkabilityScore};
use crate::models::WeatherReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// UV index categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UvCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl UvCategory {
    /// Classify a UV index value
    #[must_use]
    pub fn from_index(index: f32) -> Self {
        if index > 8.0 {
            Self::VeryHigh
        } else if index > 6.0 {
            Self::High
        } else if index > 3.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for UvCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// UV exposure assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UvExposure {
    /// UV index
    pub index: f32,
    /// Category for the index
    pub category: UvCategory,
    /// Safe unprotected exposure time in minutes
    pub safe_exposure_minutes: u32,
    /// Protection recommendations
    pub recommendations: Vec<String>,
}

impl UvExposure {
    /// Assess UV exposure for an index value
    #[must_use]
    pub fn assess(index: f32) -> Self {
        let category = UvCategory::from_index(index);
        // Exposure time shrinks 5 minutes per index point, floored at 10
        let safe_exposure_minutes = (60.0 - index * 5.0).max(10.0).min(60.0) as u32;

        let recommendations = if index > 6.0 {
            vec![
                "Wear sunscreen SPF 30+".to_string(),
                "Seek shade during peak hours".to_string(),
                "Wear protective clothing".to_string(),
            ]
        } else {
            vec!["Minimal sun protection needed".to_string()]
        };

        Self {
            index,
            category,
            safe_exposure_minutes,
            recommendations,
        }
    }
}

/// Comfort levels for working environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Indoor working conditions guidance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndoorConditions {
    /// Recommended setpoint temperature in Celsius
    pub temperature: f32,
    /// Recommended relative humidity percentage
    pub humidity: u8,
    /// Comfort level given the outdoor conditions
    pub comfort: ComfortLevel,
    /// Climate control recommendations
    pub recommendations: Vec<String>,
}

/// Outdoor working conditions guidance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutdoorConditions {
    /// Comfort level mirroring the workability category
    pub comfort: ComfortLevel,
    /// Productivity estimate (the workability score, 0-100)
    pub productivity: u8,
    /// Working recommendations
    pub recommendations: Vec<String>,
}

/// Combined indoor/outdoor working conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingConditions {
    pub indoor: IndoorConditions,
    pub outdoor: OutdoorConditions,
}

impl WorkingConditions {
    /// Assess working conditions from the report and workability score
    #[must_use]
    pub fn assess(report: &WeatherReport, workability: &WorkabilityScore) -> Self {
        let outdoor_temp = report.current.temperature;

        let indoor_comfort = if (20.0..=26.0).contains(&outdoor_temp) {
            ComfortLevel::Excellent
        } else {
            ComfortLevel::Good
        };
        let indoor_recommendations = if outdoor_temp > 26.0 {
            vec![
                "Increase air conditioning".to_string(),
                "Ensure proper ventilation".to_string(),
            ]
        } else if outdoor_temp < 20.0 {
            vec![
                "Increase heating".to_string(),
                "Consider warm beverages".to_string(),
            ]
        } else {
            vec!["Optimal indoor conditions".to_string()]
        };

        let outdoor_comfort = match workability.category {
            WorkabilityCategory::Excellent => ComfortLevel::Excellent,
            WorkabilityCategory::Good => ComfortLevel::Good,
            WorkabilityCategory::Fair => ComfortLevel::Fair,
            WorkabilityCategory::Poor | WorkabilityCategory::Hazardous => ComfortLevel::Poor,
        };

        Self {
            indoor: IndoorConditions {
                temperature: 22.0,
                humidity: 45,
                comfort: indoor_comfort,
                recommendations: indoor_recommendations,
            },
            outdoor: OutdoorConditions {
                comfort: outdoor_comfort,
                productivity: workability.score,
                recommendations: workability.recommendations.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_report;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, UvCategory::Low)]
    #[case(3.0, UvCategory::Low)]
    #[case(3.1, UvCategory::Moderate)]
    #[case(6.0, UvCategory::Moderate)]
    #[case(6.1, UvCategory::High)]
    #[case(8.0, UvCategory::High)]
    #[case(8.1, UvCategory::VeryHigh)]
    #[case(11.0, UvCategory::VeryHigh)]
    fn test_uv_category_boundaries(#[case] index: f32, #[case] expected: UvCategory) {
        assert_eq!(UvCategory::from_index(index), expected);
    }

    #[test]
    fn test_safe_exposure_floor() {
        assert_eq!(UvExposure::assess(0.0).safe_exposure_minutes, 60);
        assert_eq!(UvExposure::assess(4.0).safe_exposure_minutes, 40);
        assert_eq!(UvExposure::assess(11.0).safe_exposure_minutes, 10);
        // Non-finite input still lands inside the floor/ceiling
        let weird = UvExposure::assess(f32::NAN);
        assert!(weird.safe_exposure_minutes <= 60);
    }

    #[test]
    fn test_high_uv_gets_protection_advice() {
        let exposure = UvExposure::assess(7.0);
        assert!(exposure.recommendations.iter().any(|r| r.contains("SPF")));

        let low = UvExposure::assess(2.0);
        assert_eq!(low.recommendations, vec!["Minimal sun protection needed"]);
    }

    #[test]
    fn test_indoor_comfort_bands() {
        let mut report = demo_report();
        report.current.temperature = 22.0;
        let workability = WorkabilityScore::assess(&report);
        let conditions = WorkingConditions::assess(&report, &workability);
        assert_eq!(conditions.indoor.comfort, ComfortLevel::Excellent);
        assert_eq!(
            conditions.indoor.recommendations,
            vec!["Optimal indoor conditions"]
        );

        report.current.temperature = 30.0;
        let workability = WorkabilityScore::assess(&report);
        let conditions = WorkingConditions::assess(&report, &workability);
        assert_eq!(conditions.indoor.comfort, ComfortLevel::Good);
        assert!(
            conditions
                .indoor
                .recommendations
                .iter()
                .any(|r| r.contains("air conditioning"))
        );
    }

    #[test]
    fn test_outdoor_mirrors_workability() {
        let mut report = demo_report();
        report.current.temperature = 22.0;
        report.current.wind_speed = 10.0;
        report.current.visibility = 16.0;
        if let Some(today) = report.daily.first_mut() {
            today.precipitation_chance = 0;
        }
        let workability = WorkabilityScore::assess(&report);
        let conditions = WorkingConditions::assess(&report, &workability);
        assert_eq!(conditions.outdoor.comfort, ComfortLevel::Excellent);
        assert_eq!(conditions.outdoor.productivity, 100);
    }
}
