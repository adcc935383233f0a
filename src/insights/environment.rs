//! Synthetic air quality and pollen data
//!
//! No upstream source covers these on the free tier, so values are
//! sampled in realistic ranges. Classification is split out as pure
//! functions so the band logic is testable without randomness.

use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Air quality index categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthySensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Pollutant concentration breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantLevels {
    pub pm25: u16,
    pub pm10: u16,
    pub o3: u16,
    pub no2: u16,
    pub so2: u16,
    pub co: u16,
}

/// Air quality report with health guidance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityReport {
    /// Air quality index (1-200+)
    pub aqi: u16,
    /// Category for the index
    pub category: AqiCategory,
    /// Pollutant breakdown
    pub pollutants: PollutantLevels,
    /// Health recommendations for the category
    pub health_recommendations: Vec<String>,
}

impl AirQualityReport {
    /// Classify an index value and attach health guidance
    #[must_use]
    pub fn from_index(aqi: u16, pollutants: PollutantLevels) -> Self {
        let (category, health_recommendations) = classify_aqi(aqi);
        Self {
            aqi,
            category,
            pollutants,
            health_recommendations,
        }
    }

    /// Sample a synthetic report in the documented ranges
    #[must_use]
    pub fn sample() -> Self {
        let mut rng = rand::rng();
        let aqi = rng.random_range(1..=200);
        let pollutants = PollutantLevels {
            pm25: rng.random_range(0..100),
            pm10: rng.random_range(0..150),
            o3: rng.random_range(0..200),
            no2: rng.random_range(0..100),
            so2: rng.random_range(0..50),
            co: rng.random_range(0..10),
        };
        Self::from_index(aqi, pollutants)
    }
}

fn classify_aqi(aqi: u16) -> (AqiCategory, Vec<String>) {
    let mut recommendations = Vec::new();
    let category = if aqi <= 50 {
        recommendations.push("Air quality is satisfactory for outdoor activities".to_string());
        AqiCategory::Good
    } else if aqi <= 100 {
        recommendations
            .push("Sensitive individuals should consider limiting outdoor activities".to_string());
        AqiCategory::Moderate
    } else if aqi <= 150 {
        recommendations.push("Sensitive groups should avoid outdoor activities".to_string());
        recommendations.push("Consider wearing a mask outdoors".to_string());
        AqiCategory::UnhealthySensitive
    } else if aqi <= 200 {
        recommendations.push("Everyone should limit outdoor activities".to_string());
        recommendations.push("Wear N95 mask when outdoors".to_string());
        AqiCategory::Unhealthy
    } else {
        recommendations.push("Avoid all outdoor activities".to_string());
        recommendations.push("Keep windows closed and use air purifiers".to_string());
        AqiCategory::VeryUnhealthy
    };
    (category, recommendations)
}

impl AqiCategory {
    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy for sensitive groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pollen level categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PollenCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl PollenCategory {
    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very high",
        }
    }
}

impl std::fmt::Display for PollenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pollen report with per-source levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollenReport {
    /// Overall pollen level (1-10)
    pub overall: u8,
    /// Tree pollen level (1-10)
    pub tree: u8,
    /// Grass pollen level (1-10)
    pub grass: u8,
    /// Weed pollen level (1-10)
    pub weed: u8,
    /// Category for the overall level
    pub category: PollenCategory,
    /// Recommendations for the category
    pub recommendations: Vec<String>,
}

impl PollenReport {
    /// Classify pollen levels and attach guidance
    #[must_use]
    pub fn from_levels(overall: u8, tree: u8, grass: u8, weed: u8) -> Self {
        let (category, recommendations) = classify_pollen(overall);
        Self {
            overall,
            tree,
            grass,
            weed,
            category,
            recommendations,
        }
    }

    /// Sample a synthetic report in the documented ranges
    #[must_use]
    pub fn sample() -> Self {
        let mut rng = rand::rng();
        Self::from_levels(
            rng.random_range(1..=10),
            rng.random_range(1..=10),
            rng.random_range(1..=10),
            rng.random_range(1..=10),
        )
    }
}

fn classify_pollen(overall: u8) -> (PollenCategory, Vec<String>) {
    let mut recommendations = Vec::new();
    let category = if overall <= 2 {
        recommendations.push("Low pollen levels - minimal allergy risk".to_string());
        PollenCategory::Low
    } else if overall <= 5 {
        recommendations.push(
            "Moderate pollen levels - sensitive individuals may experience symptoms".to_string(),
        );
        recommendations.push("Consider taking allergy medication".to_string());
        PollenCategory::Moderate
    } else if overall <= 8 {
        recommendations.push("High pollen levels - limit outdoor activities".to_string());
        recommendations.push("Keep windows closed and use air conditioning".to_string());
        PollenCategory::High
    } else {
        recommendations.push("Very high pollen levels - avoid outdoor activities".to_string());
        recommendations.push("Shower and change clothes after being outdoors".to_string());
        PollenCategory::VeryHigh
    };
    (category, recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn no_pollutants() -> PollutantLevels {
        PollutantLevels {
            pm25: 0,
            pm10: 0,
            o3: 0,
            no2: 0,
            so2: 0,
            co: 0,
        }
    }

    #[rstest]
    #[case(1, AqiCategory::Good)]
    #[case(50, AqiCategory::Good)]
    #[case(51, AqiCategory::Moderate)]
    #[case(100, AqiCategory::Moderate)]
    #[case(101, AqiCategory::UnhealthySensitive)]
    #[case(150, AqiCategory::UnhealthySensitive)]
    #[case(151, AqiCategory::Unhealthy)]
    #[case(200, AqiCategory::Unhealthy)]
    #[case(201, AqiCategory::VeryUnhealthy)]
    #[case(u16::MAX, AqiCategory::VeryUnhealthy)]
    fn test_aqi_boundaries(#[case] aqi: u16, #[case] expected: AqiCategory) {
        let report = AirQualityReport::from_index(aqi, no_pollutants());
        assert_eq!(report.category, expected);
        assert!(!report.health_recommendations.is_empty());
    }

    #[rstest]
    #[case(0, PollenCategory::Low)]
    #[case(2, PollenCategory::Low)]
    #[case(3, PollenCategory::Moderate)]
    #[case(5, PollenCategory::Moderate)]
    #[case(6, PollenCategory::High)]
    #[case(8, PollenCategory::High)]
    #[case(9, PollenCategory::VeryHigh)]
    #[case(u8::MAX, PollenCategory::VeryHigh)]
    fn test_pollen_boundaries(#[case] overall: u8, #[case] expected: PollenCategory) {
        let report = PollenReport::from_levels(overall, 1, 1, 1);
        assert_eq!(report.category, expected);
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_sampled_values_stay_in_range() {
        for _ in 0..50 {
            let air = AirQualityReport::sample();
            assert!((1..=200).contains(&air.aqi));
            assert!(air.pollutants.pm25 < 100);

            let pollen = PollenReport::sample();
            assert!((1..=10).contains(&pollen.overall));
            assert!((1..=10).contains(&pollen.tree));
        }
    }

    #[test]
    fn test_categories_serialize_kebab_case() {
        let json = serde_json::to_string(&AqiCategory::UnhealthySensitive).unwrap();
        assert_eq!(json, "\"unhealthy-sensitive\"");
        let json = serde_json::to_string(&PollenCategory::VeryHigh).unwrap();
        assert_eq!(json, "\"very-high\"");
    }
}
