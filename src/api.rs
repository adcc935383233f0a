//! Weather API client for OpenWeatherMap integration
//!
//! This module provides HTTP client functionality for retrieving weather
//! data from the OpenWeatherMap API with rate limiting, retry logic, and
//! error handling. Three endpoint families are used: current weather,
//! the 5-day/3-hour forecast, and forward/reverse geocoding.

use crate::WeatherBuddyError;
use crate::config::WeatherBuddyConfig;
use crate::models::Location;
use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Rate limiter for API requests
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum requests per minute
    max_requests_per_minute: u32,
    /// Request timestamps within the current minute
    request_times: Vec<Instant>,
    /// Last cleanup time
    last_cleanup: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter
    #[must_use]
    pub fn new(max_requests_per_minute: u32) -> Self {
        Self {
            max_requests_per_minute,
            request_times: Vec::new(),
            last_cleanup: Instant::now(),
        }
    }

    /// Check if a request is allowed and record it
    pub fn allow_request(&mut self) -> bool {
        self.cleanup_old_requests();

        if self.request_times.len() >= self.max_requests_per_minute as usize {
            false
        } else {
            self.request_times.push(Instant::now());
            true
        }
    }

    /// Get time until next request is allowed
    pub fn time_until_next_request(&mut self) -> Duration {
        self.cleanup_old_requests();

        if self.request_times.len() < self.max_requests_per_minute as usize {
            Duration::from_secs(0)
        } else if let Some(oldest) = self.request_times.first() {
            let elapsed = oldest.elapsed();
            if elapsed >= Duration::from_secs(60) {
                Duration::from_secs(0)
            } else {
                Duration::from_secs(60) - elapsed
            }
        } else {
            Duration::from_secs(0)
        }
    }

    /// Remove requests older than 1 minute
    fn cleanup_old_requests(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_cleanup) >= Duration::from_secs(10) {
            let cutoff = now - Duration::from_secs(60);
            self.request_times.retain(|&time| time > cutoff);
            self.last_cleanup = now;
        }
    }
}

/// Weather API client for OpenWeatherMap
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// API configuration
    config: WeatherBuddyConfig,
    /// Rate limiter (free tier: 60 requests per minute)
    rate_limiter: Mutex<RateLimiter>,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: WeatherBuddyConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent("WeatherBuddy/0.1.0")
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let rate_limiter = Mutex::new(RateLimiter::new(60));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    fn api_key(&self) -> Result<&str> {
        if !self.config.has_usable_key() {
            return Err(WeatherBuddyError::config(
                "OpenWeatherMap API key not configured. Get a free key at https://openweathermap.org/api",
            )
            .into());
        }
        Ok(self.config.weather.api_key.as_deref().unwrap_or_default())
    }

    /// Get current weather for coordinates
    #[instrument(skip(self))]
    pub async fn get_current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<openweather::CurrentResponse> {
        info!("Getting current weather for coordinates: {:.4}, {:.4}", lat, lon);
        let start_time = Instant::now();

        let url = format!(
            "{}/weather?lat={}&lon={}&units=metric&appid={}",
            self.config.weather.base_url,
            lat,
            lon,
            self.api_key()?
        );

        let response = self.make_request(&url).await?;

        let current: openweather::CurrentResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenWeatherMap current weather response")
            .map_err(|e| {
                error!("Failed to parse current weather response: {}", e);
                WeatherBuddyError::api("Invalid weather data received from OpenWeatherMap")
            })?;

        info!(
            "Successfully retrieved current weather in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(current)
    }

    /// Get the 5-day/3-hour forecast for coordinates
    #[instrument(skip(self))]
    pub async fn get_forecast(&self, lat: f64, lon: f64) -> Result<openweather::ForecastResponse> {
        info!("Getting 5-day forecast for coordinates: {:.4}, {:.4}", lat, lon);
        let start_time = Instant::now();

        let url = format!(
            "{}/forecast?lat={}&lon={}&units=metric&appid={}",
            self.config.weather.base_url,
            lat,
            lon,
            self.api_key()?
        );

        let response = self.make_request(&url).await?;

        let forecast: openweather::ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenWeatherMap forecast response")
            .map_err(|e| {
                error!("Failed to parse forecast response: {}", e);
                WeatherBuddyError::api("Invalid forecast data received from OpenWeatherMap")
            })?;

        info!(
            "Successfully retrieved forecast with {} slots in {:.3}s",
            forecast.list.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(forecast)
    }

    /// Resolve a place name to coordinates
    #[instrument(skip(self), fields(location = location_name))]
    pub async fn geocode(&self, location_name: &str) -> Result<Vec<GeocodingResult>> {
        info!("Geocoding location: '{}'", location_name);

        let url = format!(
            "{}/direct?q={}&limit=5&appid={}",
            self.config.weather.geo_url,
            urlencoding::encode(location_name),
            self.api_key()?
        );

        let response = self.make_request(&url).await?;

        let results: Vec<GeocodingResult> = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenWeatherMap geocoding response")
            .map_err(|e| {
                error!("Failed to parse geocoding response for '{}': {}", location_name, e);
                WeatherBuddyError::api("Invalid geocoding data received from OpenWeatherMap")
            })?;

        if results.is_empty() {
            warn!("No results found for location '{}'", location_name);
        } else {
            debug!(
                "Geocoding results: {:?}",
                results
                    .iter()
                    .map(|r| format!("{} ({:.4}, {:.4})", r.name, r.lat, r.lon))
                    .collect::<Vec<_>>()
            );
        }

        Ok(results)
    }

    /// Resolve coordinates to the nearest known place
    #[instrument(skip(self))]
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Vec<GeocodingResult>> {
        debug!("Reverse geocoding coordinates: {:.4}, {:.4}", lat, lon);

        let url = format!(
            "{}/reverse?lat={}&lon={}&limit=1&appid={}",
            self.config.weather.geo_url,
            lat,
            lon,
            self.api_key()?
        );

        let response = self.make_request(&url).await?;

        let results: Vec<GeocodingResult> = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenWeatherMap reverse geocoding response")
            .map_err(|e| {
                error!("Failed to parse reverse geocoding response: {}", e);
                WeatherBuddyError::api("Invalid geocoding data received from OpenWeatherMap")
            })?;

        Ok(results)
    }

    /// Make a request with rate limiting and retry logic
    #[instrument(skip(self, url), fields(url = %url.split("appid=").next().unwrap_or(url)))]
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut attempt = 0;
        let max_attempts = self.config.weather.max_retries + 1;

        debug!("Starting HTTP request (max attempts: {})", max_attempts);

        loop {
            // Client-side rate limiting
            let wait_time = {
                let mut limiter = self
                    .rate_limiter
                    .lock()
                    .map_err(|_| WeatherBuddyError::general("Rate limiter lock poisoned"))?;
                if limiter.allow_request() {
                    Duration::from_secs(0)
                } else {
                    limiter.time_until_next_request()
                }
            };
            if wait_time > Duration::from_secs(0) {
                warn!("Rate limit reached, waiting {:.1}s", wait_time.as_secs_f64());
                tokio::time::sleep(wait_time).await;
                continue;
            }

            debug!("Making HTTP request (attempt {}/{})", attempt + 1, max_attempts);

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!("HTTP response received: {}", status);

                    if status.is_success() {
                        return Ok(response);
                    } else if status.as_u16() == 401 {
                        error!("API authentication failed (HTTP 401)");
                        return Err(WeatherBuddyError::api(
                            "Invalid API key. Please check your OpenWeatherMap API key.",
                        )
                        .into());
                    } else if status.as_u16() == 404 {
                        warn!("Location not found (HTTP 404)");
                        return Err(WeatherBuddyError::api(
                            "Location not found. Please check the coordinates or location name.",
                        )
                        .into());
                    } else if status.as_u16() == 429 {
                        // Rate limited by the server
                        let retry_after = response
                            .headers()
                            .get("retry-after")
                            .and_then(|h| h.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(60);

                        warn!(
                            "Server rate limit exceeded (HTTP 429), retry after {}s",
                            retry_after
                        );

                        if attempt < max_attempts - 1 {
                            tokio::time::sleep(Duration::from_secs(retry_after)).await;
                            attempt += 1;
                            continue;
                        }
                        error!("Rate limit exceeded and retry attempts exhausted");
                        return Err(WeatherBuddyError::api(
                            "Rate limit exceeded and retry attempts exhausted.",
                        )
                        .into());
                    } else {
                        let error_msg = format!(
                            "API request failed with status: {} - {}",
                            status,
                            status.canonical_reason().unwrap_or("Unknown error")
                        );

                        warn!("HTTP error on attempt {}: {}", attempt + 1, error_msg);

                        if attempt < max_attempts - 1 {
                            // Exponential backoff for server errors
                            let backoff = Duration::from_millis(1000 * (2_u64.pow(attempt)));
                            debug!("Exponential backoff: waiting {:.1}s", backoff.as_secs_f64());
                            tokio::time::sleep(backoff).await;
                            attempt += 1;
                            continue;
                        }
                        error!("API request failed after all attempts: {}", error_msg);
                        return Err(WeatherBuddyError::api(error_msg).into());
                    }
                }
                Err(e) => {
                    warn!("Network error on attempt {}: {}", attempt + 1, e);

                    if attempt < max_attempts - 1 {
                        let backoff = Duration::from_millis(1000 * (2_u64.pow(attempt)));
                        debug!("Network error backoff: waiting {:.1}s", backoff.as_secs_f64());
                        tokio::time::sleep(backoff).await;
                        attempt += 1;
                        continue;
                    }
                    error!("Network error after {} attempts: {}", max_attempts, e);
                    return Err(WeatherBuddyError::api(format!(
                        "Network error after {max_attempts} attempts: {e}"
                    ))
                    .into());
                }
            }
        }
    }
}

/// Geocoding result from the OpenWeatherMap geocoding API
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeocodingResult {
    /// Location name
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lon: f64,
    /// Country code
    pub country: Option<String>,
    /// State name (for US locations)
    pub state: Option<String>,
}

impl GeocodingResult {
    /// Full display name: "Name, State, Country" with absent parts skipped
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.clone()];
        if let Some(state) = &self.state {
            if !state.is_empty() {
                parts.push(state.clone());
            }
        }
        if let Some(country) = &self.country {
            if !country.is_empty() {
                parts.push(country.clone());
            }
        }
        parts.join(", ")
    }
}

impl From<GeocodingResult> for Location {
    fn from(geocoding: GeocodingResult) -> Self {
        let name = geocoding.display_name();
        match geocoding.country {
            Some(country) => Location::with_country(geocoding.lat, geocoding.lon, name, country),
            None => Location::new(geocoding.lat, geocoding.lon, name),
        }
    }
}

/// `OpenWeatherMap` API response structures and conversion utilities
pub mod openweather {
    use crate::models::{
        CurrentConditions, DailyEntry, HourlyEntry, ReportSource, WeatherKind, WeatherReport,
        forecast::day_label,
    };
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::Deserialize;

    /// Current weather response
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        /// Place name as reported by the API
        pub name: Option<String>,
        pub sys: Option<SysData>,
        pub main: MainData,
        pub weather: Vec<ConditionData>,
        pub wind: Option<WindData>,
        /// Visibility in metres
        pub visibility: Option<f32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SysData {
        pub country: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainData {
        pub temp: f32,
        #[serde(default)]
        pub feels_like: f32,
        #[serde(default)]
        pub humidity: u8,
        #[serde(default)]
        pub pressure: u32,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionData {
        pub main: String,
        pub description: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct WindData {
        /// Wind speed in m/s (metric units)
        #[serde(default)]
        pub speed: f32,
        /// Wind direction in degrees
        pub deg: Option<f32>,
    }

    /// 5-day/3-hour forecast response
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastSlot>,
    }

    /// One 3-hour forecast slot
    #[derive(Debug, Deserialize)]
    pub struct ForecastSlot {
        /// Unix timestamp of the slot
        pub dt: i64,
        pub main: MainData,
        pub weather: Vec<ConditionData>,
        pub wind: Option<WindData>,
        /// Probability of precipitation (0.0-1.0)
        pub pop: Option<f32>,
    }

    impl ForecastSlot {
        fn timestamp(&self) -> DateTime<Utc> {
            DateTime::from_timestamp(self.dt, 0).unwrap_or_else(Utc::now)
        }

        fn condition(&self) -> WeatherKind {
            self.weather
                .first()
                .map_or(WeatherKind::PartlyCloudy, |w| {
                    WeatherKind::classify(&w.main, &w.description)
                })
        }

        fn description(&self) -> String {
            self.weather.first().map_or_else(String::new, |w| {
                CurrentConditions::capitalize_description(&w.description)
            })
        }

        fn precipitation_chance(&self) -> u8 {
            let pop = self.pop.unwrap_or(0.0).clamp(0.0, 1.0);
            (pop * 100.0).round() as u8
        }

        fn wind_speed_kmh(&self) -> f32 {
            CurrentConditions::ms_to_kmh(self.wind.as_ref().map_or(0.0, |w| w.speed))
        }
    }

    impl CurrentResponse {
        /// Display name for the place: "Name, Country" when both are known
        #[must_use]
        pub fn display_name(&self) -> Option<String> {
            let name = self.name.as_ref().filter(|n| !n.is_empty())?;
            match self.sys.as_ref().and_then(|s| s.country.as_ref()) {
                Some(country) if !country.is_empty() => Some(format!("{name}, {country}")),
                _ => Some(name.clone()),
            }
        }
    }

    /// Convert current conditions from the API response
    #[must_use]
    pub fn convert_current(current: &CurrentResponse) -> CurrentConditions {
        let condition = current
            .weather
            .first()
            .map_or(WeatherKind::PartlyCloudy, |w| {
                WeatherKind::classify(&w.main, &w.description)
            });
        let description = current.weather.first().map_or_else(String::new, |w| {
            CurrentConditions::capitalize_description(&w.description)
        });
        let wind_deg = current
            .wind
            .as_ref()
            .and_then(|w| w.deg)
            .unwrap_or(0.0)
            .rem_euclid(360.0)
            .round() as u16;

        CurrentConditions {
            temperature: current.main.temp.round(),
            condition,
            description,
            humidity: current.main.humidity,
            wind_speed: CurrentConditions::ms_to_kmh(
                current.wind.as_ref().map_or(0.0, |w| w.speed),
            ),
            wind_direction: CurrentConditions::wind_direction_to_cardinal(wind_deg).to_string(),
            pressure: current.main.pressure,
            visibility: CurrentConditions::metres_to_km(current.visibility.unwrap_or(10_000.0)),
            // Not available from the free tier
            uv_index: 0.0,
            feels_like: current.main.feels_like.round(),
            icon: condition.icon_slug().to_string(),
        }
    }

    /// Assemble a full report from the current weather and forecast
    /// responses.
    ///
    /// Hourly entries come from the first `hourly_hours` forecast slots;
    /// daily entries aggregate the slots per calendar date, capped at
    /// `daily_days`.
    #[must_use]
    pub fn build_report(
        location: String,
        current: &CurrentResponse,
        forecast: &ForecastResponse,
        hourly_hours: usize,
        daily_days: usize,
    ) -> WeatherReport {
        let hourly: Vec<HourlyEntry> = forecast
            .list
            .iter()
            .take(hourly_hours)
            .map(|slot| {
                let condition = slot.condition();
                HourlyEntry {
                    timestamp: slot.timestamp(),
                    temperature: slot.main.temp.round(),
                    condition,
                    precipitation_chance: slot.precipitation_chance(),
                    wind_speed: slot.wind_speed_kmh(),
                    icon: condition.icon_slug().to_string(),
                }
            })
            .collect();

        let daily = build_daily(forecast, daily_days);

        WeatherReport {
            location,
            current: convert_current(current),
            hourly,
            daily,
            retrieved_at: Utc::now(),
            source: ReportSource::Live,
        }
    }

    fn build_daily(forecast: &ForecastResponse, daily_days: usize) -> Vec<DailyEntry> {
        let mut seen: Vec<NaiveDate> = Vec::new();
        let mut daily = Vec::new();

        for slot in &forecast.list {
            let date = slot.timestamp().date_naive();
            if seen.contains(&date) {
                continue;
            }
            if daily.len() >= daily_days {
                break;
            }
            seen.push(date);

            // High/low aggregate over every slot on this date
            let day_slots: Vec<&ForecastSlot> = forecast
                .list
                .iter()
                .filter(|s| s.timestamp().date_naive() == date)
                .collect();
            let high = day_slots
                .iter()
                .map(|s| s.main.temp)
                .fold(f32::NEG_INFINITY, f32::max)
                .round();
            let low = day_slots
                .iter()
                .map(|s| s.main.temp)
                .fold(f32::INFINITY, f32::min)
                .round();

            let condition = slot.condition();
            daily.push(DailyEntry {
                date,
                day_name: day_label(daily.len(), date),
                high,
                low,
                condition,
                description: slot.description(),
                precipitation_chance: slot.precipitation_chance(),
                humidity: slot.main.humidity,
                wind_speed: slot.wind_speed_kmh(),
                icon: condition.icon_slug().to_string(),
            });
        }

        daily
    }
}
