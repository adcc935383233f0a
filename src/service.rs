//! Report assembly and the fallback contract
//!
//! `WeatherService::report` is the one entry point every surface (CLI,
//! web, assistant) goes through. It resolves a location query, fetches
//! current conditions and the forecast concurrently, and assembles a
//! `WeatherReport`. Any failure along the way resolves to the built-in
//! demo report: callers always receive a displayable report.

use crate::api::{WeatherApiClient, openweather};
use crate::config::WeatherBuddyConfig;
use crate::demo;
use crate::models::{Location, WeatherReport};
use crate::{WeatherBuddyError, cache};
use anyhow::Result;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A location request from any surface
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// A place name to geocode ("Berlin", "New York, US")
    Named(String),
    /// Explicit coordinates, optionally pre-labelled by the caller
    Coordinates {
        lat: f64,
        lon: f64,
        label: Option<String>,
    },
    /// The configured home location
    Home,
}

impl LocationQuery {
    /// Parse free-form location input: "52.52,13.40" becomes
    /// coordinates, anything else a place name. Empty input is the one
    /// request that is rejected rather than served demo data.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(
                WeatherBuddyError::validation("Location cannot be empty").into(),
            );
        }

        if let Some(coords) = Self::parse_coordinates(input) {
            return Ok(LocationQuery::Coordinates {
                lat: coords.0,
                lon: coords.1,
                label: None,
            });
        }

        Ok(LocationQuery::Named(input.to_string()))
    }

    /// Parse coordinates from "52.52,13.40" or "52.52 13.40"
    fn parse_coordinates(input: &str) -> Option<(f64, f64)> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some((lat, lon))
    }
}

/// Weather report service with demo-data fallback
pub struct WeatherService {
    client: WeatherApiClient,
    config: WeatherBuddyConfig,
}

impl WeatherService {
    /// Create a service from configuration
    pub fn new(config: WeatherBuddyConfig) -> Result<Self> {
        let client = WeatherApiClient::new(config.clone())?;
        Ok(Self { client, config })
    }

    /// Produce a weather report for the query. Never fails: every error
    /// path resolves to the demo report, re-labelled with the requested
    /// place when one was given.
    #[instrument(skip(self))]
    pub async fn report(&self, query: &LocationQuery) -> WeatherReport {
        if !self.config.has_usable_key() {
            warn!(
                "OpenWeatherMap API key not configured. Using demo data. \
                 Get your free API key at: https://openweathermap.org/api"
            );
            return self.fallback(query);
        }

        match self.try_report(query).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Weather request failed, using demo data: {e:#}");
                self.fallback(query)
            }
        }
    }

    /// The fallible path behind `report`
    async fn try_report(&self, query: &LocationQuery) -> Result<WeatherReport> {
        let location = self.resolve(query).await?;
        let cache_key = location.cache_key("report");

        if let Some(cached) = cache::get::<WeatherReport>(&cache_key).await? {
            debug!("Serving cached report for {}", location.name);
            return Ok(cached);
        }

        // Current conditions and the forecast are independent calls;
        // issue them concurrently and join.
        let (current, forecast) = futures::try_join!(
            self.client
                .get_current_weather(location.latitude, location.longitude),
            self.client
                .get_forecast(location.latitude, location.longitude),
        )?;

        let label = match query {
            LocationQuery::Coordinates { label: None, .. } => current
                .display_name()
                .unwrap_or_else(|| location.name.clone()),
            _ => location.name.clone(),
        };

        let report = openweather::build_report(
            label,
            &current,
            &forecast,
            self.config.defaults.hourly_hours as usize,
            self.config.defaults.daily_days as usize,
        );

        // Jitter the TTL so co-located keys do not all expire at once
        let jitter: f32 = rand::rng().random_range(0.9..1.1);
        let ttl_secs = (self.config.cache.ttl_minutes as f32 * 60.0 * jitter) as u64;
        cache::put(&cache_key, report.clone(), Duration::from_secs(ttl_secs)).await?;

        info!(
            "Assembled report for {} ({} hourly, {} daily entries)",
            report.location,
            report.hourly.len(),
            report.daily.len()
        );
        Ok(report)
    }

    /// Resolve a query to a located place
    async fn resolve(&self, query: &LocationQuery) -> Result<Location> {
        match query {
            LocationQuery::Named(name) => {
                let results = self.client.geocode(name).await?;
                let best = results.into_iter().next().ok_or_else(|| {
                    WeatherBuddyError::api(format!(
                        "Unable to find location '{name}'. Please check the spelling and try again."
                    ))
                })?;
                Ok(Location::from(best))
            }
            LocationQuery::Coordinates { lat, lon, label } => {
                if let Some(label) = label {
                    return Ok(Location::new(*lat, *lon, label.clone()));
                }
                // Reverse geocoding failure is not fatal: fall back to
                // bare coordinates as the display name.
                match self.client.reverse_geocode(*lat, *lon).await {
                    Ok(results) => match results.into_iter().next() {
                        Some(best) => Ok(Location::from(best)),
                        None => {
                            debug!("No reverse geocoding results, using coordinates as name");
                            Ok(Location::new(*lat, *lon, format!("{lat:.2}, {lon:.2}")))
                        }
                    },
                    Err(e) => {
                        debug!("Reverse geocoding failed: {e}, using coordinates as name");
                        Ok(Location::new(*lat, *lon, format!("{lat:.2}, {lon:.2}")))
                    }
                }
            }
            LocationQuery::Home => Ok(Location::new(
                self.config.defaults.home_latitude,
                self.config.defaults.home_longitude,
                self.config.defaults.home_name.clone(),
            )),
        }
    }

    /// Demo report labelled with whatever place the caller asked for
    fn fallback(&self, query: &LocationQuery) -> WeatherReport {
        let report = demo::demo_report();
        match query {
            LocationQuery::Named(name) => report.with_location(name.clone()),
            LocationQuery::Coordinates {
                label: Some(label), ..
            } => report.with_location(label.clone()),
            LocationQuery::Coordinates { lat, lon, label: None } => {
                report.with_location(format!("{lat:.2}, {lon:.2}"))
            }
            LocationQuery::Home => report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportSource;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_with(base: &str, key: Option<&str>) -> WeatherService {
        let mut config = WeatherBuddyConfig::default();
        config.weather.api_key = key.map(String::from);
        config.weather.base_url = base.to_string();
        config.weather.geo_url = base.to_string();
        config.weather.max_retries = 0;
        WeatherService::new(config).unwrap()
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert!(LocationQuery::parse("").is_err());
        assert!(LocationQuery::parse("   ").is_err());
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            LocationQuery::parse("52.52,13.40").unwrap(),
            LocationQuery::Coordinates {
                lat: 52.52,
                lon: 13.40,
                label: None
            }
        );
        assert_eq!(
            LocationQuery::parse("52.52 13.40").unwrap(),
            LocationQuery::Coordinates {
                lat: 52.52,
                lon: 13.40,
                label: None
            }
        );
    }

    #[test]
    fn test_parse_name_and_out_of_range_coordinates() {
        assert_eq!(
            LocationQuery::parse("Berlin").unwrap(),
            LocationQuery::Named("Berlin".to_string())
        );
        // Out-of-range numbers are treated as a name, not coordinates
        assert_eq!(
            LocationQuery::parse("1234,5678").unwrap(),
            LocationQuery::Named("1234,5678".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_key_serves_demo_with_requested_name() {
        let service = service_with("http://127.0.0.1:9", None);
        let report = service
            .report(&LocationQuery::Named("Berlin".to_string()))
            .await;
        assert_eq!(report.source, ReportSource::Demo);
        assert_eq!(report.location, "Berlin");
    }

    #[tokio::test]
    async fn test_server_error_serves_demo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = service_with(&server.uri(), Some("integration_test_key"));
        let report = service
            .report(&LocationQuery::Named("Berlin".to_string()))
            .await;
        assert_eq!(report.source, ReportSource::Demo);
        assert_eq!(report.location, "Berlin");
    }

    #[tokio::test]
    async fn test_unknown_location_serves_demo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .mount(&server)
            .await;

        let service = service_with(&server.uri(), Some("integration_test_key"));
        let report = service
            .report(&LocationQuery::Named("Xyzzy".to_string()))
            .await;
        assert_eq!(report.source, ReportSource::Demo);
        assert_eq!(report.location, "Xyzzy");
    }

    #[tokio::test]
    async fn test_live_report_via_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{"name": "Berlin", "lat": 52.52, "lon": 13.40, "country": "DE"}]"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{
                    "name": "Berlin",
                    "sys": {"country": "DE"},
                    "main": {"temp": 18.2, "feels_like": 17.9, "humidity": 55, "pressure": 1015},
                    "weather": [{"main": "Clear", "description": "clear sky"}],
                    "wind": {"speed": 4.2, "deg": 90},
                    "visibility": 10000
                }"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"list": [{
                    "dt": 1769508000,
                    "main": {"temp": 17.0, "feels_like": 16.5, "humidity": 60, "pressure": 1014},
                    "weather": [{"main": "Clear", "description": "clear sky"}],
                    "wind": {"speed": 3.0, "deg": 100},
                    "pop": 0.0
                }]}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let service = service_with(&server.uri(), Some("integration_test_key"));
        let report = service
            .report(&LocationQuery::Named("Berlin".to_string()))
            .await;

        assert_eq!(report.source, ReportSource::Live);
        assert_eq!(report.location, "Berlin, DE");
        assert_eq!(report.current.temperature, 18.0);
        assert_eq!(report.current.wind_direction, "E");
        assert_eq!(report.daily.len(), 1);
    }
}
