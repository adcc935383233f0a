//! Built-in demo dataset
//!
//! Substituted whenever live data cannot be obtained: missing API key,
//! authentication failure, unknown location, network error or malformed
//! payload. The service never surfaces those failures to the caller;
//! it serves this report instead.

use crate::models::{
    CurrentConditions, DailyEntry, HourlyEntry, ReportSource, WeatherKind, WeatherReport,
    forecast::day_label,
};
use chrono::{Duration, NaiveTime, Utc};

/// Demo report location name
pub const DEMO_LOCATION: &str = "New York, NY";

struct HourlySeed(u32, f32, WeatherKind, u8, f32);
struct DailySeed(f32, f32, WeatherKind, &'static str, u8, u8, f32);

const HOURLY_SEEDS: [HourlySeed; 10] = [
    HourlySeed(9, 20.0, WeatherKind::Cloudy, 0, 10.0),
    HourlySeed(10, 21.0, WeatherKind::PartlyCloudy, 0, 12.0),
    HourlySeed(11, 23.0, WeatherKind::Sunny, 0, 15.0),
    HourlySeed(12, 25.0, WeatherKind::Sunny, 0, 18.0),
    HourlySeed(13, 26.0, WeatherKind::Sunny, 0, 20.0),
    HourlySeed(14, 27.0, WeatherKind::PartlyCloudy, 5, 22.0),
    HourlySeed(15, 26.0, WeatherKind::Cloudy, 10, 20.0),
    HourlySeed(16, 24.0, WeatherKind::LightRain, 15, 18.0),
    HourlySeed(17, 22.0, WeatherKind::LightRain, 20, 16.0),
    HourlySeed(18, 20.0, WeatherKind::Cloudy, 5, 14.0),
];

const DAILY_SEEDS: [DailySeed; 5] = [
    DailySeed(27.0, 18.0, WeatherKind::PartlyCloudy, "Pleasant with afternoon showers", 20, 65, 18.0),
    DailySeed(24.0, 16.0, WeatherKind::Rain, "Steady rain throughout the day", 80, 85, 25.0),
    DailySeed(19.0, 12.0, WeatherKind::Cloudy, "Overcast with cool temperatures", 10, 70, 15.0),
    DailySeed(23.0, 14.0, WeatherKind::Sunny, "Clear skies and pleasant weather", 0, 45, 12.0),
    DailySeed(26.0, 17.0, WeatherKind::PartlyCloudy, "Mix of sun and clouds", 5, 55, 14.0),
];

/// Build the demo report. Hourly slots land on today's morning-to-evening
/// hours and daily entries start at today's date, so the report always
/// reads as current.
#[must_use]
pub fn demo_report() -> WeatherReport {
    let today = Utc::now().date_naive();

    let hourly = HOURLY_SEEDS
        .iter()
        .map(|&HourlySeed(hour, temperature, condition, precipitation, wind)| HourlyEntry {
            timestamp: today
                .and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
                .and_utc(),
            temperature,
            condition,
            precipitation_chance: precipitation,
            wind_speed: wind,
            icon: condition.icon_slug().to_string(),
        })
        .collect();

    let daily = DAILY_SEEDS
        .iter()
        .enumerate()
        .map(
            |(offset, &DailySeed(high, low, condition, description, precipitation, humidity, wind))| {
                let date = today + Duration::days(offset as i64);
                DailyEntry {
                    date,
                    day_name: day_label(offset, date),
                    high,
                    low,
                    condition,
                    description: description.to_string(),
                    precipitation_chance: precipitation,
                    humidity,
                    wind_speed: wind,
                    icon: condition.icon_slug().to_string(),
                }
            },
        )
        .collect();

    WeatherReport {
        location: DEMO_LOCATION.to_string(),
        current: CurrentConditions {
            temperature: 22.0,
            condition: WeatherKind::PartlyCloudy,
            description: "Pleasant with some clouds".to_string(),
            humidity: 65,
            wind_speed: 12.0,
            wind_direction: "NW".to_string(),
            pressure: 1013,
            visibility: 16.0,
            uv_index: 4.0,
            feels_like: 24.0,
            icon: WeatherKind::PartlyCloudy.icon_slug().to_string(),
        },
        hourly,
        daily,
        retrieved_at: Utc::now(),
        source: ReportSource::Demo,
    }
}
