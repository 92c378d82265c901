use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of a single weather fetch.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The weather API answered with a non-success status.
    #[error("weather request failed with status {status}")]
    FetchFailed { status: StatusCode },

    /// The body parsed, but lacks the sections a record needs.
    #[error("weather response is missing required data: {0}")]
    InvalidPayload(String),

    /// The request never produced a usable response (DNS, connect, body read).
    #[error("failed to reach the weather service")]
    Transport(#[from] reqwest::Error),
}

/// Terminal outcome of a search. Advice failures are not part of this
/// taxonomy: they degrade to a fallback string instead of ending the search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no city name provided")]
    EmptyInput,

    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl SearchError {
    /// The single user-visible error string for this search outcome.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::EmptyInput => "Please enter a city name.".to_string(),
            SearchError::Weather(WeatherError::FetchFailed { .. }) => {
                "Could not fetch weather data. Please check the city name.".to_string()
            }
            SearchError::Weather(WeatherError::InvalidPayload(_)) => {
                "Received incomplete weather data. Please try again.".to_string()
            }
            SearchError::Weather(WeatherError::Transport(e)) => {
                format!("An error occurred: {e}")
            }
        }
    }
}
