use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use tracing::debug;

use advisor_core::{AdviceClient, Config, SearchController, SearchState, WeatherClient};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-advisor", version, about = "Weather advisor CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather and a short advisory for a city.
    Search {
        /// City name, e.g. "London".
        city: String,
    },

    /// Prompt for city names in a loop; type `exit` to quit.
    Interactive,

    /// Store API keys in the configuration file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Search { city } => {
                let controller = controller_from_config()?;
                run_search(&controller, &city).await;
            }
            Command::Interactive => {
                let controller = controller_from_config()?;
                loop {
                    let city = Text::new("City (or `exit`):").prompt()?;
                    if city.trim() == "exit" {
                        break;
                    }
                    run_search(&controller, &city).await;
                }
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

/// Read the configuration once and hand the keys to the clients explicitly.
fn controller_from_config() -> Result<SearchController> {
    let config = Config::from_env()?;
    debug!(path = %Config::config_file_path()?.display(), "configuration loaded");

    let weather = WeatherClient::new(config.weather_key());
    let advice = AdviceClient::new(config.gemini_key());

    Ok(SearchController::new(Box::new(weather), Box::new(advice)))
}

async fn run_search(controller: &SearchController, city: &str) {
    // Loading indicator: watch the store until the loading flag flips on.
    let mut rx = controller.store().subscribe();
    let notice = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if rx.borrow().is_loading {
                println!("Fetching weather...");
                break;
            }
        }
    });

    controller.search(city).await;
    notice.abort();

    render(&controller.store().snapshot());
}

fn render(state: &SearchState) {
    if let Some(error) = &state.error_message {
        eprintln!("Error: {error}");
        return;
    }

    println!("{}", state.location);
    println!("  Condition:   {} (icon {})", state.condition, state.icon);
    println!(
        "  Temperature: {} (feels like {})",
        state.temperature, state.feels_like
    );
    println!("  Min / max:   {}", state.temp_range);
    println!("  Humidity:    {}", state.humidity);
    println!("  Pressure:    {}", state.pressure);
    println!("  Wind:        {}", state.wind);
    println!("  Sunrise:     {}  Sunset: {}", state.sunrise, state.sunset);
    println!();
    println!("{}", state.advice);
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let weather_key = Password::new("OpenWeather API key (empty to keep current):")
        .without_confirmation()
        .prompt()?;
    let gemini_key = Password::new("Gemini API key (empty to keep current):")
        .without_confirmation()
        .prompt()?;

    if !weather_key.trim().is_empty() {
        config.weather_api_key = Some(weather_key.trim().to_string());
    }
    if !gemini_key.trim().is_empty() {
        config.gemini_api_key = Some(gemini_key.trim().to_string());
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}
