//! Wardrobe advice by temperature band
//!
//! Produces outfit suggestions for two wardrobe profiles (business
//! formal and outdoor work), with rain and wind add-ons.

use crate::models::WeatherReport;
use serde::{Deserialize, Serialize};

/// Wardrobe profiles advice can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WardrobeCategory {
    Formal,
    BusinessCasual,
    OutdoorWork,
    Travel,
}

/// Clothing advice for one wardrobe profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClothingAdvice {
    /// Profile this advice targets
    pub category: WardrobeCategory,
    /// Core garments
    pub items: Vec<String>,
    /// Accessories
    pub accessories: Vec<String>,
    /// Footwear
    pub footwear: Vec<String>,
    /// Free-form notes
    pub notes: Vec<String>,
}

impl ClothingAdvice {
    fn empty(category: WardrobeCategory) -> Self {
        Self {
            category,
            items: Vec::new(),
            accessories: Vec::new(),
            footwear: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn push_all(list: &mut Vec<String>, entries: &[&str]) {
        list.extend(entries.iter().map(|s| (*s).to_string()));
    }
}

/// Generate clothing advice for the formal and outdoor-work profiles
#[must_use]
pub fn generate_advice(report: &WeatherReport) -> Vec<ClothingAdvice> {
    let current = &report.current;
    let precipitation = report.precipitation_chance();
    let mut advice = Vec::new();

    // Business formal attire
    let mut formal = ClothingAdvice::empty(WardrobeCategory::Formal);

    if current.temperature < 10.0 {
        ClothingAdvice::push_all(
            &mut formal.items,
            &["Wool suit or heavy blazer", "Long-sleeve dress shirt", "Warm undergarments"],
        );
        ClothingAdvice::push_all(
            &mut formal.accessories,
            &["Wool coat or overcoat", "Scarf", "Gloves"],
        );
        ClothingAdvice::push_all(
            &mut formal.footwear,
            &["Closed-toe leather shoes", "Warm socks"],
        );
    } else if current.temperature < 20.0 {
        ClothingAdvice::push_all(&mut formal.items, &["Business suit", "Long-sleeve shirt"]);
        ClothingAdvice::push_all(&mut formal.accessories, &["Light jacket or blazer"]);
        ClothingAdvice::push_all(&mut formal.footwear, &["Dress shoes"]);
    } else if current.temperature < 30.0 {
        ClothingAdvice::push_all(&mut formal.items, &["Lightweight suit", "Dress shirt"]);
        ClothingAdvice::push_all(&mut formal.footwear, &["Breathable dress shoes"]);
    } else {
        ClothingAdvice::push_all(
            &mut formal.items,
            &["Lightweight suit", "Short-sleeve dress shirt"],
        );
        ClothingAdvice::push_all(&mut formal.accessories, &["Portable fan", "Cooling towel"]);
        ClothingAdvice::push_all(&mut formal.footwear, &["Breathable dress shoes"]);
        formal
            .notes
            .push("Consider indoor meetings during peak heat".to_string());
    }

    if precipitation > 30 {
        ClothingAdvice::push_all(&mut formal.accessories, &["Umbrella", "Waterproof coat"]);
        ClothingAdvice::push_all(&mut formal.footwear, &["Water-resistant shoes"]);
    }

    advice.push(formal);

    // Outdoor work attire
    let mut outdoor = ClothingAdvice::empty(WardrobeCategory::OutdoorWork);

    if current.temperature < 0.0 {
        ClothingAdvice::push_all(
            &mut outdoor.items,
            &["Insulated work jacket", "Thermal layers", "Insulated pants"],
        );
        ClothingAdvice::push_all(
            &mut outdoor.accessories,
            &["Insulated gloves", "Warm hat", "Face protection"],
        );
        ClothingAdvice::push_all(
            &mut outdoor.footwear,
            &["Insulated work boots", "Warm socks"],
        );
        outdoor.notes.push("Limit outdoor exposure time".to_string());
    } else if current.temperature > 30.0 {
        ClothingAdvice::push_all(
            &mut outdoor.items,
            &["Lightweight work shirt", "Moisture-wicking clothing"],
        );
        ClothingAdvice::push_all(
            &mut outdoor.accessories,
            &["Wide-brim hat", "Sunglasses", "Cooling vest"],
        );
        ClothingAdvice::push_all(&mut outdoor.footwear, &["Breathable work boots"]);
        ClothingAdvice::push_all(
            &mut outdoor.notes,
            &["Take frequent shade breaks", "Stay hydrated"],
        );
    }

    if current.wind_speed > 20.0 {
        ClothingAdvice::push_all(
            &mut outdoor.accessories,
            &["Secure hat or helmet", "Wind-resistant jacket"],
        );
    }

    advice.push(outdoor);

    advice
}
