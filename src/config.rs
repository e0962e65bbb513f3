use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

use crate::util::clamp_dead_zone;

/// Tunables for input handling, read from `input.json` in the app dir.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Stick deflection that counts as a direction.
    pub dead_zone: f32,
    /// How long the controller notice stays up.
    pub notice_seconds: u64,
    /// Repaint interval while a controller is connected.
    pub controller_repaint_ms: u64,
    /// Repaint interval otherwise, so new controllers are noticed.
    pub idle_repaint_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dead_zone: 0.5,
            notice_seconds: 3,
            controller_repaint_ms: 16,
            idle_repaint_ms: 250,
        }
    }
}

impl InputConfig {
    pub fn parse(raw: &str) -> Result<Self, String> {
        serde_json::from_str::<Self>(raw)
            .map(Self::sanitized)
            .map_err(|e| format!("invalid input config: {e}"))
    }

    /// Load from `path`, falling back to defaults when the file is missing or
    /// malformed.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("config: {} not read ({err}); using defaults", path.display());
                return Self::default();
            }
        };
        Self::parse(&raw).unwrap_or_else(|err| {
            warn!("config: {err}; using defaults");
            Self::default()
        })
    }

    pub fn with_dead_zone(mut self, dead_zone: Option<f32>) -> Self {
        if let Some(value) = dead_zone {
            self.dead_zone = clamp_dead_zone(value);
        }
        self
    }

    fn sanitized(mut self) -> Self {
        self.dead_zone = clamp_dead_zone(self.dead_zone);
        self.notice_seconds = self.notice_seconds.max(1);
        self.controller_repaint_ms = self.controller_repaint_ms.max(1);
        self
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }

    pub fn controller_repaint(&self) -> Duration {
        Duration::from_millis(self.controller_repaint_ms)
    }

    pub fn idle_repaint(&self) -> Duration {
        Duration::from_millis(self.idle_repaint_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = InputConfig::parse(r#"{ "dead_zone": 0.3 }"#).expect("valid json");
        assert_eq!(config.dead_zone, 0.3);
        assert_eq!(config.notice_seconds, 3);
        assert_eq!(config.idle_repaint(), Duration::from_millis(250));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config =
            InputConfig::parse(r#"{ "dead_zone": 1.5, "notice_seconds": 0 }"#).expect("valid json");
        assert_eq!(config.dead_zone, 0.95);
        assert_eq!(config.notice_duration(), Duration::from_secs(1));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "ore-launcher-input-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").expect("write temp config");
        let config = InputConfig::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config, InputConfig::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = InputConfig::load(Path::new("/nonexistent/ore-launcher/input.json"));
        assert_eq!(config, InputConfig::default());
    }

    #[test]
    fn cli_dead_zone_overrides_file() {
        let config = InputConfig::default().with_dead_zone(Some(0.01));
        assert_eq!(config.dead_zone, 0.05);
        assert_eq!(InputConfig::default().with_dead_zone(None).dead_zone, 0.5);
    }
}
