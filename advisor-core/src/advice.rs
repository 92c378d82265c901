use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::WeatherRecord;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-1.5-flash";
const MAX_OUTPUT_TOKENS: u32 = 65;
const GENERATION_TEMPERATURE: f32 = 0.7;

/// Shown when the advice request fails outright. A soft failure: the search
/// itself still counts as successful.
pub const FALLBACK_ADVICE: &str = "Could not fetch AI advice at this time.";

/// Shown when the model answers but returns no candidates.
const NO_ADVICE: &str = "No advice available";

/// Seam over the advisory backend so the search flow can run against test doubles.
#[async_trait]
pub trait FetchAdvice: Send + Sync {
    async fn fetch_advice(&self, weather: &WeatherRecord) -> String;
}

/// Request envelope for the generateContent endpoint. Field names follow the
/// wire format exactly.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl GenerateRequest {
    /// Single-turn prompt built from the record's temperature and humidity.
    pub fn for_weather(weather: &WeatherRecord) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(weather),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: GENERATION_TEMPERATURE,
            },
        }
    }
}

fn build_prompt(weather: &WeatherRecord) -> String {
    format!(
        "Give greeting message, along with what's the weather like and friendly short \
         one-liner advice that enhances the quality of the day based on this weather:\n\
         Temperature: {}°C, Humidity: {}%",
        weather.temperature_c, weather.humidity_pct
    )
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

fn first_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
}

/// Gemini generateContent client.
#[derive(Debug, Clone)]
pub struct AdviceClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl AdviceClient {
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

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<Option<String>> {
        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);

        debug!("requesting weather advice");
        let res = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("advice request failed with status {status}");
        }

        let parsed: GenerateResponse = res.json().await?;
        Ok(first_text(parsed))
    }
}

#[async_trait]
impl FetchAdvice for AdviceClient {
    async fn fetch_advice(&self, weather: &WeatherRecord) -> String {
        let request = GenerateRequest::for_weather(weather);

        match self.generate(&request).await {
            Ok(Some(text)) => text,
            Ok(None) => NO_ADVICE.to_string(),
            Err(e) => {
                warn!("advice unavailable: {e:#}");
                FALLBACK_ADVICE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> WeatherRecord {
        WeatherRecord {
            city: "London".to_string(),
            country: "GB".to_string(),
            temperature_c: 21.3,
            feels_like_c: 20.8,
            temp_min_c: 19.0,
            temp_max_c: 23.1,
            humidity_pct: 55,
            pressure_hpa: 1013,
            wind_speed_mps: 4.6,
            wind_deg: 200,
            wind_gust_mps: None,
            condition: "scattered clouds".to_string(),
            icon: "03d".to_string(),
            sunrise_unix: 1_755_662_400,
            sunset_unix: 1_755_712_800,
        }
    }

    #[test]
    fn prompt_embeds_temperature_and_humidity() {
        let prompt = build_prompt(&sample_record());
        assert!(prompt.contains("Temperature: 21.3°C, Humidity: 55%"));
    }

    #[test]
    fn request_round_trips_through_wire_format() {
        let request = GenerateRequest::for_weather(&sample_record());
        let json = serde_json::to_string(&request).expect("request must serialize");

        let value: serde_json::Value = serde_json::from_str(&json).expect("must be valid JSON");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 65);
        let temperature = value["generationConfig"]["temperature"]
            .as_f64()
            .expect("temperature must be a number");
        assert!((temperature - 0.7).abs() < 1e-6);

        let reparsed: GenerateRequest =
            serde_json::from_str(&json).expect("request must deserialize");
        assert_eq!(reparsed, request);
        assert_eq!(
            reparsed.contents[0].parts[0].text,
            build_prompt(&sample_record())
        );
    }

    #[test]
    fn first_text_extracts_first_candidate_part() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Take an umbrella."}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(first_text(parsed).as_deref(), Some("Take an umbrella."));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_text(parsed), None);
    }
}
