//! Professional weather insights
//!
//! Deterministic scoring and classification heuristics layered on top of
//! a weather report: commute impact, outdoor workability, travel risk,
//! clothing advice, synthetic air quality and pollen, UV exposure and
//! working-conditions guidance.

pub mod clothing;
pub mod commute;
pub mod environment;
pub mod exposure;
pub mod travel;
pub mod workability;

pub use clothing::{ClothingAdvice, WardrobeCategory, generate_advice};
pub use commute::{CommuteImpact, CommuteSeverity};
pub use environment::{AirQualityReport, AqiCategory, PollenCategory, PollenReport};
pub use exposure::{ComfortLevel, UvCategory, UvExposure, WorkingConditions};
pub use travel::{FlightDelayRisk, RoadConditions, TransitImpact, TravelImpact};
pub use workability::{WorkabilityCategory, WorkabilityScore};

use crate::models::WeatherReport;
use serde::{Deserialize, Serialize};

/// All professional insights derived from one weather report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalReport {
    /// Commute impact assessment
    pub commute_impact: CommuteImpact,
    /// Outdoor workability score
    pub workability_score: WorkabilityScore,
    /// Travel risk assessment
    pub travel_impact: TravelImpact,
    /// Clothing advice per wardrobe profile
    pub clothing_recommendations: Vec<ClothingAdvice>,
    /// Synthetic air quality data
    pub air_quality: AirQualityReport,
    /// Synthetic pollen data
    pub pollen: PollenReport,
    /// UV exposure assessment
    pub uv_exposure: UvExposure,
    /// Indoor/outdoor working conditions
    pub working_conditions: WorkingConditions,
}

impl ProfessionalReport {
    /// Derive every insight from a weather report. Pure aside from the
    /// sampled air-quality and pollen figures.
    #[must_use]
    pub fn generate(report: &WeatherReport) -> Self {
        let commute_impact = CommuteImpact::assess(report);
        let workability_score = WorkabilityScore::assess(report);
        let travel_impact = TravelImpact::assess(report);
        let clothing_recommendations = generate_advice(report);
        let air_quality = AirQualityReport::sample();
        let pollen = PollenReport::sample();
        let uv_exposure = UvExposure::assess(report.current.uv_index);
        let working_conditions = WorkingConditions::assess(report, &workability_score);

        Self {
            commute_impact,
            workability_score,
            travel_impact,
            clothing_recommendations,
            air_quality,
            pollen,
            uv_exposure,
            working_conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_report;

    #[test]
    fn test_generate_covers_every_insight() {
        let report = demo_report();
        let professional = ProfessionalReport::generate(&report);

        assert_eq!(professional.clothing_recommendations.len(), 2);
        assert!((1..=200).contains(&professional.air_quality.aqi));
        assert!((1..=10).contains(&professional.pollen.overall));
        assert_eq!(
            professional.working_conditions.outdoor.productivity,
            professional.workability_score.score
        );
        // Demo data: 22°C, partly cloudy, light wind
        assert_eq!(professional.commute_impact.severity, CommuteSeverity::Low);
        assert_eq!(
            professional.workability_score.category,
            WorkabilityCategory::Excellent
        );
    }

    #[test]
    fn test_report_serializes_to_json() {
        let professional = ProfessionalReport::generate(&demo_report());
        let json = serde_json::to_value(&professional).unwrap();
        assert!(json.get("commute_impact").is_some());
        assert!(json.get("workability_score").is_some());
        assert!(json.get("uv_exposure").is_some());
    }
}
