//! Current weather conditions, condition classification and unit helpers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display condition classes mapped from the provider's condition
/// group and description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherKind {
    Sunny,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
    #[serde(rename = "Light Rain")]
    LightRain,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherKind {
    /// Classify a provider condition group (e.g. "Clouds") plus its
    /// description (e.g. "scattered clouds") into a display condition.
    #[must_use]
    pub fn classify(group: &str, description: &str) -> Self {
        let group = group.to_lowercase();
        let description = description.to_lowercase();

        if group.contains("clear") {
            return Self::Sunny;
        }
        if group.contains("cloud") {
            if description.contains("few") || description.contains("scattered") {
                return Self::PartlyCloudy;
            }
            return Self::Cloudy;
        }
        if group.contains("rain") || group.contains("drizzle") {
            if description.contains("light") {
                return Self::LightRain;
            }
            return Self::Rain;
        }
        if group.contains("snow") {
            return Self::Snow;
        }
        if group.contains("thunder") {
            return Self::Thunderstorm;
        }
        if group.contains("mist") || group.contains("fog") {
            return Self::Cloudy;
        }
        Self::PartlyCloudy
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::LightRain => "Light Rain",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
        }
    }

    /// Icon slug used by front-ends (lowercase, hyphenated)
    #[must_use]
    pub fn icon_slug(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::LightRain | Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
        }
    }

    /// Whether this condition involves rain or snow
    #[must_use]
    pub fn is_wet(&self) -> bool {
        matches!(
            self,
            Self::LightRain | Self::Rain | Self::Snow | Self::Thunderstorm
        )
    }

    /// Whether this condition involves snow
    #[must_use]
    pub fn is_snowy(&self) -> bool {
        matches!(self, Self::Snow)
    }

    /// Whether this condition involves rain
    #[must_use]
    pub fn is_rainy(&self) -> bool {
        matches!(self, Self::LightRain | Self::Rain)
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Current weather conditions for a location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f32,
    /// Display condition
    pub condition: WeatherKind,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in km/h
    pub wind_speed: f32,
    /// Cardinal wind direction (16-point compass)
    pub wind_direction: String,
    /// Atmospheric pressure in hPa
    pub pressure: u32,
    /// Visibility in kilometers
    pub visibility: f32,
    /// UV index (0 when the provider does not supply one)
    pub uv_index: f32,
    /// Apparent temperature in Celsius
    pub feels_like: f32,
    /// Weather condition icon slug
    pub icon: String,
}

impl CurrentConditions {
    /// Convert wind direction from degrees to a cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }

    /// Convert a wind speed in m/s (provider unit) to km/h
    #[must_use]
    pub fn ms_to_kmh(ms: f32) -> f32 {
        (ms * 3.6).round()
    }

    /// Convert visibility in metres (provider unit) to kilometres
    #[must_use]
    pub fn metres_to_km(metres: f32) -> f32 {
        (metres / 1000.0).round()
    }

    /// Capitalize the first letter of a provider description
    #[must_use]
    pub fn capitalize_description(description: &str) -> String {
        let mut chars = description.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.0}°C", self.temperature)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.0} km/h {}", self.wind_speed, self.wind_direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_conditions() {
        assert_eq!(WeatherKind::classify("Clear", "clear sky"), WeatherKind::Sunny);
        assert_eq!(
            WeatherKind::classify("Clouds", "few clouds"),
            WeatherKind::PartlyCloudy
        );
        assert_eq!(
            WeatherKind::classify("Clouds", "scattered clouds"),
            WeatherKind::PartlyCloudy
        );
        assert_eq!(
            WeatherKind::classify("Clouds", "overcast clouds"),
            WeatherKind::Cloudy
        );
        assert_eq!(
            WeatherKind::classify("Rain", "light rain"),
            WeatherKind::LightRain
        );
        assert_eq!(
            WeatherKind::classify("Rain", "moderate rain"),
            WeatherKind::Rain
        );
        assert_eq!(WeatherKind::classify("Snow", "snow"), WeatherKind::Snow);
        assert_eq!(
            WeatherKind::classify("Thunderstorm", "thunderstorm"),
            WeatherKind::Thunderstorm
        );
        assert_eq!(WeatherKind::classify("Mist", "mist"), WeatherKind::Cloudy);
        assert_eq!(
            WeatherKind::classify("Haze", "haze"),
            WeatherKind::PartlyCloudy
        );
    }

    #[test]
    fn test_icon_slugs_are_hyphenated() {
        assert_eq!(WeatherKind::PartlyCloudy.icon_slug(), "partly-cloudy");
        assert_eq!(WeatherKind::LightRain.icon_slug(), "rain");
    }

    #[test]
    fn test_wind_direction_to_cardinal() {
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(0), "N");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(90), "E");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(180), "S");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(270), "W");
        assert_eq!(CurrentConditions::wind_direction_to_cardinal(315), "NW");
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(CurrentConditions::ms_to_kmh(10.0), 36.0);
        assert_eq!(CurrentConditions::metres_to_km(10_000.0), 10.0);
    }

    #[test]
    fn test_capitalize_description() {
        assert_eq!(
            CurrentConditions::capitalize_description("scattered clouds"),
            "Scattered clouds"
        );
        assert_eq!(CurrentConditions::capitalize_description(""), "");
    }

    #[test]
    fn test_condition_serializes_as_label() {
        let json = serde_json::to_string(&WeatherKind::PartlyCloudy).unwrap();
        assert_eq!(json, "\"Partly Cloudy\"");
    }
}
