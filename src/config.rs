// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration.
//!
//! The browser build uses `Config::default()`. The native static host loads
//! overrides from environment variables (and `.env`, if present).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::db::keys;

/// Default OpenStreetMap France "hot" tile server.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Browser app ---
    /// localStorage slot holding the workout collection
    pub storage_key: String,
    /// Zoom level for the initial view and list navigation
    pub map_zoom: u8,
    /// Delay before a hidden form gets its layout space back
    pub form_restore_delay: Duration,
    /// Leaflet tile URL template
    pub tile_url: String,
    pub tile_attribution: String,

    // --- Static host ---
    /// Server port
    pub port: u16,
    /// Directory holding index.html and the wasm bundle
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: keys::WORKOUTS.to_string(),
            map_zoom: 13,
            form_restore_delay: Duration::from_millis(1000),
            tile_url: DEFAULT_TILE_URL.to_string(),
            tile_attribution:
                r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#
                    .to_string(),
            port: 8080,
            static_dir: PathBuf::from("web"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Ok(Self {
            storage_key: env::var("MAPTY_STORAGE_KEY").unwrap_or(defaults.storage_key),
            map_zoom: parse_var("MAPTY_MAP_ZOOM", defaults.map_zoom)?,
            form_restore_delay: Duration::from_millis(parse_var(
                "MAPTY_FORM_RESTORE_MS",
                defaults.form_restore_delay.as_millis() as u64,
            )?),
            tile_url: env::var("MAPTY_TILE_URL").unwrap_or(defaults.tile_url),
            tile_attribution: defaults.tile_attribution,
            port: parse_var("PORT", defaults.port)?,
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
