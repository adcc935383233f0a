//! Day-planning recommendations
//!
//! Short, prioritized suggestions (what to wear, when to leave, whether
//! to eat outside) derived from the current conditions and today's
//! outlook.

use crate::models::{WeatherKind, WeatherReport};
use serde::{Deserialize, Serialize};

/// Recommendation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Meeting,
    Commute,
    Lunch,
    Outdoor,
    Attire,
}

/// Recommendation priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One day-planning recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Category
    pub kind: RecommendationKind,
    /// Short title
    pub title: String,
    /// One-sentence description
    pub description: String,
    /// Priority
    pub priority: Priority,
    /// Icon slug for front-ends
    pub icon: String,
}

impl Recommendation {
    fn new(
        kind: RecommendationKind,
        title: &str,
        description: &str,
        priority: Priority,
        icon: &str,
    ) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            priority,
            icon: icon.to_string(),
        }
    }
}

/// Build the recommendation list for a report
#[must_use]
pub fn plan_day(report: &WeatherReport) -> Vec<Recommendation> {
    let current = &report.current;
    let precipitation = report.precipitation_chance();
    let mut recommendations = Vec::new();

    // Attire
    if current.temperature < 15.0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Attire,
            "Dress Warmly",
            "Consider wearing a coat or jacket. Temperature is quite cool today.",
            Priority::Medium,
            "jacket",
        ));
    } else if current.temperature > 30.0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Attire,
            "Light Clothing",
            "Wear breathable fabrics. It will be quite warm today.",
            Priority::Medium,
            "shirt",
        ));
    }

    // Commute
    if precipitation > 50 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Commute,
            "Plan for Rain",
            "Bring an umbrella and allow extra time for commute.",
            Priority::High,
            "umbrella",
        ));
    }

    // Wind
    if current.wind_speed > 25.0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Commute,
            "Windy Conditions",
            "Strong winds expected. Secure loose items and be cautious outdoors.",
            Priority::Medium,
            "car",
        ));
    }

    // Meetings
    if current.condition == WeatherKind::Sunny
        && current.temperature > 20.0
        && current.temperature < 28.0
    {
        recommendations.push(Recommendation::new(
            RecommendationKind::Meeting,
            "Consider Outdoor Meeting",
            "Perfect weather for an outdoor meeting or walking discussion.",
            Priority::Low,
            "users",
        ));
    }

    // Lunch
    if current.temperature > 18.0 && precipitation < 20 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Lunch,
            "Great for Outdoor Lunch",
            "Weather is perfect for eating outside or taking a lunch walk.",
            Priority::Low,
            "coffee",
        ));
    }

    // UV
    if current.uv_index > 6.0 {
        recommendations.push(Recommendation::new(
            RecommendationKind::Outdoor,
            "UV Protection Needed",
            "High UV levels. Wear sunscreen and consider sunglasses.",
            Priority::Medium,
            "shirt",
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_report;
    use crate::models::WeatherKind;

    fn titles(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_cool_day_suggests_warm_clothes() {
        let mut report = demo_report();
        report.current.temperature = 10.0;
        let recs = plan_day(&report);
        assert!(titles(&recs).contains(&"Dress Warmly"));
    }

    #[test]
    fn test_hot_day_suggests_light_clothes() {
        let mut report = demo_report();
        report.current.temperature = 32.0;
        let recs = plan_day(&report);
        assert!(titles(&recs).contains(&"Light Clothing"));
    }

    #[test]
    fn test_rainy_outlook_is_high_priority() {
        let mut report = demo_report();
        if let Some(today) = report.daily.first_mut() {
            today.precipitation_chance = 60;
        }
        let recs = plan_day(&report);
        let rain = recs.iter().find(|r| r.title == "Plan for Rain").unwrap();
        assert_eq!(rain.priority, Priority::High);
        assert_eq!(rain.kind, RecommendationKind::Commute);
    }

    #[test]
    fn test_sunny_mild_day_suggests_outdoor_meeting_and_lunch() {
        let mut report = demo_report();
        report.current.condition = WeatherKind::Sunny;
        report.current.temperature = 24.0;
        if let Some(today) = report.daily.first_mut() {
            today.precipitation_chance = 0;
        }
        let recs = plan_day(&report);
        assert!(titles(&recs).contains(&"Consider Outdoor Meeting"));
        assert!(titles(&recs).contains(&"Great for Outdoor Lunch"));
    }

    #[test]
    fn test_high_uv_suggests_protection() {
        let mut report = demo_report();
        report.current.uv_index = 8.0;
        let recs = plan_day(&report);
        assert!(titles(&recs).contains(&"UV Protection Needed"));
    }

    #[test]
    fn test_bland_day_yields_no_recommendations() {
        let mut report = demo_report();
        report.current.temperature = 16.0;
        report.current.condition = WeatherKind::Cloudy;
        report.current.wind_speed = 10.0;
        report.current.uv_index = 2.0;
        if let Some(today) = report.daily.first_mut() {
            today.precipitation_chance = 30;
        }
        let recs = plan_day(&report);
        assert!(recs.is_empty());
    }

    #[test]
    fn test_extreme_inputs_do_not_panic() {
        let mut report = demo_report();
        report.current.temperature = f32::NAN;
        report.current.wind_speed = f32::INFINITY;
        report.current.uv_index = f32::NEG_INFINITY;
        let _ = plan_day(&report);
    }
}
