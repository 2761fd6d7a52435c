//! User settings stored as settings.json in the app data directory

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    /// When set, the app runs as a single-site kiosk: this URL loads
    /// immediately and the home screen is never shown.
    pub kiosk_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            kiosk_url: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_multi_site() {
        let settings = Settings::default();
        assert!(settings.kiosk_url.is_none());
        assert!(settings.window_w.is_none());
    }

    #[test]
    fn unknown_and_missing_fields_fall_back_to_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"kiosk_url":"https://www.pdfdrive.com","legacy":1}"#).unwrap();
        assert_eq!(
            settings.kiosk_url.as_deref(),
            Some("https://www.pdfdrive.com")
        );
        assert!(settings.window_x.is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let settings = Settings {
            window_x: Some(10.0),
            window_y: Some(20.0),
            window_w: Some(900.0),
            window_h: Some(700.0),
            kiosk_url: None,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window_w, Some(900.0));
        assert_eq!(back.window_y, Some(20.0));
    }
}
