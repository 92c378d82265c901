//! Core library for the `weather-advisor` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather and advisory fetchers
//! - The observable search state and its orchestration
//!
//! It is used by `advisor-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod state;
pub mod weather;

pub use advice::{AdviceClient, FALLBACK_ADVICE, FetchAdvice};
pub use config::Config;
pub use error::{SearchError, WeatherError};
pub use model::WeatherRecord;
pub use search::SearchController;
pub use state::{SearchState, SearchStore};
pub use weather::{FetchWeather, WeatherClient};
