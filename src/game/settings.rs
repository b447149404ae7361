use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BOARD_SIDE: u32 = 11;
/// Transient interval the session is constructed with; replaced by
/// [`DEFAULT_TICK_INTERVAL_MS`] before the first tick can fire.
pub const STARTUP_TICK_INTERVAL_MS: u64 = 200;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 400;

/// Construction-time configuration. Fixed for the lifetime of an engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub board_side: u32,
    pub startup_tick_interval_ms: u64,
    pub tick_interval_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            board_side: DEFAULT_BOARD_SIDE,
            startup_tick_interval_ms: STARTUP_TICK_INTERVAL_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.board_side < 2 || self.board_side > 100 {
            return Err("Board side must be between 2 and 100".to_string());
        }
        if self.tick_interval_ms < 50 || self.tick_interval_ms > 5000 {
            return Err("Tick interval must be between 50ms and 5000ms".to_string());
        }
        if self.startup_tick_interval_ms < 50 || self.startup_tick_interval_ms > 5000 {
            return Err("Startup tick interval must be between 50ms and 5000ms".to_string());
        }
        Ok(())
    }

    pub fn startup_tick_interval(&self) -> Duration {
        Duration::from_millis(self.startup_tick_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn from_yaml_file(file_path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(file_path)
            .map_err(|e| format!("Failed to read settings file {}: {}", file_path, e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let settings: EngineSettings = serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to parse settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}
