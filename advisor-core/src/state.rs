use serde::Serialize;
use tokio::sync::watch;

/// Greeting shown before any search has run.
pub const INITIAL_ADVICE: &str = "Enter a city name to get weather information";

/// Placeholder for display fields that have no value yet.
pub const PLACEHOLDER: &str = "--";

/// UI-facing snapshot of the current search: inputs, status flags, and
/// formatted display strings. Fields only change after a fully successful
/// parse of the corresponding response; a failed search leaves the previous
/// display values in place and sets `error_message`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchState {
    pub city_input: String,
    pub is_loading: bool,
    pub error_message: Option<String>,

    pub temperature: String,
    pub feels_like: String,
    pub temp_range: String,
    pub humidity: String,
    pub pressure: String,
    pub wind: String,
    pub condition: String,
    pub icon: String,
    pub sunrise: String,
    pub sunset: String,
    pub location: String,
    pub advice: String,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            city_input: String::new(),
            is_loading: false,
            error_message: None,
            temperature: PLACEHOLDER.to_string(),
            feels_like: PLACEHOLDER.to_string(),
            temp_range: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
            pressure: PLACEHOLDER.to_string(),
            wind: PLACEHOLDER.to_string(),
            condition: PLACEHOLDER.to_string(),
            icon: PLACEHOLDER.to_string(),
            sunrise: PLACEHOLDER.to_string(),
            sunset: PLACEHOLDER.to_string(),
            location: PLACEHOLDER.to_string(),
            advice: INITIAL_ADVICE.to_string(),
        }
    }
}

/// Single-owner store for the search snapshot. Subscribers observe every
/// published state through a watch channel; all mutations funnel through
/// one `send_modify` path, so readers never see a half-updated snapshot.
#[derive(Debug)]
pub struct SearchStore {
    tx: watch::Sender<SearchState>,
}

impl SearchStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SearchState::default());
        Self { tx }
    }

    /// Hand out a receiver that yields the current state and every change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.tx.subscribe()
    }

    /// Clone of the current snapshot.
    pub fn snapshot(&self) -> SearchState {
        self.tx.borrow().clone()
    }

    pub(crate) fn update(&self, apply: impl FnOnce(&mut SearchState)) {
        self.tx.send_modify(apply);
    }
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_uses_placeholders() {
        let state = SearchState::default();
        assert_eq!(state.temperature, "--");
        assert_eq!(state.humidity, "--");
        assert_eq!(state.advice, INITIAL_ADVICE);
        assert!(!state.is_loading);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn subscribers_observe_updates() {
        let store = SearchStore::new();
        let rx = store.subscribe();

        store.update(|state| {
            state.is_loading = true;
            state.city_input = "London".to_string();
        });

        let seen = rx.borrow();
        assert!(seen.is_loading);
        assert_eq!(seen.city_input, "London");
    }

    #[test]
    fn snapshot_is_detached_from_later_updates() {
        let store = SearchStore::new();
        let before = store.snapshot();

        store.update(|state| state.temperature = "21.3°C".to_string());

        assert_eq!(before.temperature, "--");
        assert_eq!(store.snapshot().temperature, "21.3°C");
    }
}
