use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parsed result of a current-weather query. Immutable once built; each new
/// search replaces the previous record wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_deg: u16,
    pub wind_gust_mps: Option<f64>,
    pub condition: String,
    pub icon: String,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
}

impl WeatherRecord {
    pub fn temperature_display(&self) -> String {
        format_celsius(self.temperature_c)
    }

    pub fn feels_like_display(&self) -> String {
        format_celsius(self.feels_like_c)
    }

    pub fn temp_range_display(&self) -> String {
        format!(
            "{} / {}",
            format_celsius(self.temp_min_c),
            format_celsius(self.temp_max_c)
        )
    }

    pub fn humidity_display(&self) -> String {
        format!("{}%", self.humidity_pct)
    }

    pub fn pressure_display(&self) -> String {
        format!("{} hPa", self.pressure_hpa)
    }

    /// Speed with a 16-point compass direction, gusts appended when reported.
    pub fn wind_display(&self) -> String {
        let mut out = format!(
            "{:.1} m/s {}",
            self.wind_speed_mps,
            compass_point(self.wind_deg)
        );
        if let Some(gust) = self.wind_gust_mps {
            out.push_str(&format!(", gusts {gust:.1} m/s"));
        }
        out
    }

    pub fn sunrise_display(&self) -> String {
        format_sun_time(self.sunrise_unix)
    }

    pub fn sunset_display(&self) -> String {
        format_sun_time(self.sunset_unix)
    }

    pub fn location_display(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

pub fn format_celsius(value: f64) -> String {
    format!("{value:.1}°C")
}

/// Map a wind bearing in degrees onto the 16-point compass rose.
pub fn compass_point(deg: u16) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    let sector = ((f64::from(deg) / 22.5) + 0.5) as usize % 16;
    POINTS[sector]
}

/// Unix seconds rendered as an HH:MM clock time (UTC; the API reports no zone).
fn format_sun_time(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
