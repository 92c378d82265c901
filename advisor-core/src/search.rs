use tracing::debug;

use crate::{
    advice::FetchAdvice,
    error::SearchError,
    model::WeatherRecord,
    state::{SearchState, SearchStore},
    weather::FetchWeather,
};

/// Drives one search at a time: validate the city, fetch weather, publish the
/// formatted fields, then fetch the advisory. Weather failure is terminal for
/// the search; advice failure only downgrades the advisory text.
pub struct SearchController {
    weather: Box<dyn FetchWeather>,
    advice: Box<dyn FetchAdvice>,
    store: SearchStore,
}

impl SearchController {
    pub fn new(weather: Box<dyn FetchWeather>, advice: Box<dyn FetchAdvice>) -> Self {
        Self {
            weather,
            advice,
            store: SearchStore::new(),
        }
    }

    /// The observable state this controller publishes into.
    pub fn store(&self) -> &SearchStore {
        &self.store
    }

    /// Run one search to completion. Never returns an error: every outcome,
    /// including unexpected ones, lands in the published state.
    pub async fn search(&self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            self.store.update(|state| {
                state.error_message = Some(SearchError::EmptyInput.user_message());
            });
            return;
        }

        debug!(city, "starting search");
        self.store.update(|state| {
            state.city_input = city.to_string();
            state.is_loading = true;
            state.error_message = None;
        });

        let weather = match self.weather.fetch_current(city).await {
            Ok(record) => record,
            Err(e) => {
                let message = SearchError::from(e).user_message();
                self.store.update(|state| {
                    state.error_message = Some(message);
                    state.is_loading = false;
                });
                return;
            }
        };

        self.store.update(|state| publish_weather(state, &weather));

        // Advice depends on the weather record, so the calls stay sequential.
        let advice = self.advice.fetch_advice(&weather).await;
        self.store.update(|state| {
            state.advice = advice;
            state.is_loading = false;
        });
    }
}

fn publish_weather(state: &mut SearchState, weather: &WeatherRecord) {
    state.temperature = weather.temperature_display();
    state.feels_like = weather.feels_like_display();
    state.temp_range = weather.temp_range_display();
    state.humidity = weather.humidity_display();
    state.pressure = weather.pressure_display();
    state.wind = weather.wind_display();
    state.condition = weather.condition.clone();
    state.icon = weather.icon.clone();
    state.sunrise = weather.sunrise_display();
    state.sunset = weather.sunset_display();
    state.location = weather.location_display();
}
