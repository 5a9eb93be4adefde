use crate::services::cache::{CacheKey, CacheManager};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default OpenWeatherMap current-conditions endpoint
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Key shipped in sample configs; treated as "no key configured"
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// City used when nothing else can be derived
const DEFAULT_CITY: &str = "Pune";

/// Base villages that the provider does not know, mapped to a nearby town
const VILLAGE_FALLBACKS: &[(&str, &str)] = &[
    ("Torna Peth", "Pune"),
    ("Udhewadi / Kondhane", "Lonavala"),
    ("Kondhane", "Lonavala"),
    ("Udhewadi", "Lonavala"),
    ("Bhira / Tamhini", "Mulshi"),
    ("Bhira", "Mulshi"),
    ("Tamhini", "Mulshi"),
    ("Thakurwadi / Prabalmachi", "Karjat"),
    ("Thakurwadi", "Karjat"),
    ("Prabalmachi", "Karjat"),
    ("Malshej", "Junnar"),
    ("Rajur", "Akole"),
];

/// Trekking regions mapped to their main town
const REGION_FALLBACKS: &[(&str, &str)] = &[
    ("Pune – Lonavala – Mulshi Belt", "Pune"),
    ("Mumbai – Panvel – Karjat – Matheran Belt", "Karjat"),
    ("Nashik – Bhandardara Belt", "Nashik"),
    ("Satara – Mahabaleshwar – Kaas Belt", "Mahabaleshwar"),
    ("Malshej Ghat Belt", "Junnar"),
    ("Konkan Belt", "Ratnagiri"),
];

/// Errors that can occur when querying the weather provider
///
/// These never reach callers of [`WeatherClient::current`]; a failed lookup
/// moves on to the next candidate location.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Where a reading came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    Live,
    Placeholder,
    Fallback,
}

/// Current conditions near a trek
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: i32,
    pub description: String,
    pub main: String,
    pub icon: String,
    pub humidity: u32,
    #[serde(rename = "windSpeed")]
    pub wind_speed: f64,
    pub location: String,
    pub source: WeatherSource,
}

impl WeatherReport {
    /// Fixed reading used when no API key is configured
    pub fn placeholder(city: Option<&str>) -> Self {
        Self {
            temperature: 22,
            description: "Clear sky".to_string(),
            main: "Clear".to_string(),
            icon: "01d".to_string(),
            humidity: 65,
            wind_speed: 3.2,
            location: location_label(city),
            source: WeatherSource::Placeholder,
        }
    }

    /// Fixed reading used when every candidate location failed
    pub fn fallback(city: Option<&str>) -> Self {
        Self {
            temperature: 25,
            description: "Cloudy".to_string(),
            main: "Unknown".to_string(),
            icon: "01d".to_string(),
            humidity: 60,
            wind_speed: 2.5,
            location: location_label(city),
            source: WeatherSource::Fallback,
        }
    }
}

fn location_label(city: Option<&str>) -> String {
    city.unwrap_or("Trek Location").to_string()
}

/// First name of a multi-name village ("Bhira / Tamhini" -> "Bhira")
fn clean_city(city: &str) -> &str {
    city.split(" / ").next().unwrap_or(city).trim()
}

fn lookup_fallback(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, fallback)| *fallback)
}

/// Locations to query, in order, for a trek's base village and region
///
/// The cleaned village name comes first, followed by known fallbacks for the
/// village and then for the region. Defaults to Pune when nothing is known.
pub fn candidate_locations(city: Option<&str>, region: Option<&str>) -> Vec<String> {
    fn push(location: &str, locations: &mut Vec<String>) {
        if !locations.iter().any(|existing| existing == location) {
            locations.push(location.to_string());
        }
    }

    let mut locations: Vec<String> = Vec::new();

    if let Some(city) = city.filter(|c| !c.is_empty()) {
        let clean = clean_city(city);
        push(clean, &mut locations);

        if let Some(fallback) = lookup_fallback(VILLAGE_FALLBACKS, city) {
            push(fallback, &mut locations);
        }
        if let Some(fallback) = lookup_fallback(VILLAGE_FALLBACKS, clean) {
            push(fallback, &mut locations);
        }
    }

    if let Some(fallback) = region.and_then(|r| lookup_fallback(REGION_FALLBACKS, r)) {
        push(fallback, &mut locations);
    }

    if locations.is_empty() {
        locations.push(DEFAULT_CITY.to_string());
    }

    locations
}

/// Provider query string for a location
pub fn location_query(location: &str, region: Option<&str>) -> String {
    match region {
        Some(region) if region.contains("Maharashtra") => format!("{},Maharashtra,IN", location),
        _ => format!("{},IN", location),
    }
}

/// Capitalise the first letter of every word and lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    name: String,
    main: ProviderMain,
    #[serde(default)]
    weather: Vec<ProviderCondition>,
    #[serde(default)]
    wind: Option<ProviderWind>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ProviderWind {
    #[serde(default)]
    speed: f64,
}

/// Weather provider client
///
/// Handles:
/// - Resolving a trek's village/region into lookup locations
/// - Querying the provider for each location until one answers
/// - Falling back to fixed readings when the provider is unavailable
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    cache: Option<CacheManager>,
}

impl WeatherClient {
    /// Create a new weather client
    ///
    /// A missing, blank or sample API key disables provider lookups.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY);

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            cache: None,
        })
    }

    /// Cache live readings in `cache`
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions for a trek's base village and region
    ///
    /// Never fails: provider errors degrade to a fixed fallback reading.
    pub async fn current(&self, city: Option<&str>, region: Option<&str>) -> WeatherReport {
        let city = city.filter(|c| !c.is_empty());

        let Some(api_key) = self.api_key.as_deref() else {
            return WeatherReport::placeholder(city);
        };

        let cache_key = CacheKey::weather(city, region);
        if let Some(cache) = &self.cache {
            if let Ok(report) = cache.get::<WeatherReport>(&cache_key).await {
                return report;
            }
        }

        for location in candidate_locations(city, region) {
            match self.fetch(&location, region, api_key).await {
                Ok(response) => match build_report(response, &location, city) {
                    Ok(report) => {
                        if let Some(cache) = &self.cache {
                            if let Err(e) = cache.set(&cache_key, &report).await {
                                tracing::warn!("Failed to cache weather for {}: {}", cache_key, e);
                            }
                        }
                        return report;
                    }
                    Err(e) => tracing::debug!("Weather response for {} unusable: {}", location, e),
                },
                Err(e) => tracing::debug!("Weather lookup for {} failed: {}", location, e),
            }
        }

        tracing::warn!(
            "All weather lookups failed for city={:?} region={:?}, using fallback",
            city,
            region
        );
        WeatherReport::fallback(city)
    }

    async fn fetch(
        &self,
        location: &str,
        region: Option<&str>,
        api_key: &str,
    ) -> Result<ProviderResponse, WeatherError> {
        let query = location_query(location, region);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query.as_str()), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(WeatherError::UnexpectedStatus(response.status().as_u16()));
        }

        Ok(response.json::<ProviderResponse>().await?)
    }
}

fn build_report(
    response: ProviderResponse,
    location: &str,
    city: Option<&str>,
) -> Result<WeatherReport, WeatherError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::InvalidResponse("missing weather conditions".to_string()))?;

    let queried_city = city.map(clean_city).unwrap_or("");
    let label = if location != queried_city {
        format!("{} (near {})", response.name, city.unwrap_or("trek area"))
    } else {
        response.name
    };

    Ok(WeatherReport {
        temperature: response.main.temp.round_ties_even() as i32,
        description: title_case(&condition.description),
        main: condition.main,
        icon: condition.icon,
        humidity: response.main.humidity,
        wind_speed: response.wind.map_or(0.0, |wind| wind.speed),
        location: label,
        source: WeatherSource::Live,
    })
}
