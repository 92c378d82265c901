use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{error::WeatherError, model::WeatherRecord};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Seam over the weather backend so the search flow can run against test doubles.
#[async_trait]
pub trait FetchWeather: Send + Sync {
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, WeatherError>;
}

/// OpenWeather current-weather client. No retries; the reqwest default
/// timeout behavior applies.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl FetchWeather for WeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        debug!(city, "requesting current weather");
        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            debug!(%status, "weather request rejected");
            return Err(WeatherError::FetchFailed { status });
        }

        let body = res.text().await?;
        parse_current(&body)
    }
}

/// Parse a current-weather body into a record, rejecting payloads that lack
/// the main section or report no conditions.
fn parse_current(body: &str) -> Result<WeatherRecord, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::InvalidPayload(format!("malformed weather JSON: {e}")))?;

    let main = parsed
        .main
        .ok_or_else(|| WeatherError::InvalidPayload("missing main section".to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::InvalidPayload("empty weather condition list".to_string()))?;

    Ok(WeatherRecord {
        city: parsed.name,
        country: parsed.sys.country,
        temperature_c: main.temp,
        feels_like_c: main.feels_like,
        temp_min_c: main.temp_min,
        temp_max_c: main.temp_max,
        humidity_pct: main.humidity,
        pressure_hpa: main.pressure,
        wind_speed_mps: parsed.wind.speed,
        wind_deg: parsed.wind.deg,
        wind_gust_mps: parsed.wind.gust,
        condition: condition.description,
        icon: condition.icon,
        sunrise_unix: parsed.sys.sunrise,
        sunset_unix: parsed.sys.sunset,
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

// OpenWeather omits wind numbers entirely when the air is calm.
#[derive(Debug, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: u16,
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: Option<OwMain>,
    wind: OwWind,
    sys: OwSys,
}
