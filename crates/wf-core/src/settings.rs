use std::path::PathBuf;

use crate::config::{ConfigError, MonitorConfig};

/// Manages loading and saving the panel configuration as TOML on disk.
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    /// Create a new `SettingsManager` that reads/writes the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a `SettingsManager` using the default config location
    /// (`~/.config/wayfinder/monitor.toml`).
    pub fn default_path() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("wayfinder")
            .join("monitor.toml");
        Self { path }
    }

    /// Load the configuration from the TOML file on disk.
    pub fn load(&self) -> Result<MonitorConfig, ConfigError> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let cfg: MonitorConfig =
            toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save the configuration to the TOML file on disk, creating parent
    /// directories if they don't exist.
    pub fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let text = config.to_toml()?;
        std::fs::write(&self.path, text).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "panel configuration saved");
        Ok(())
    }

    /// Load from disk, falling back to `MonitorConfig::default()` when the
    /// file is missing or unparseable.
    pub fn load_or_default(&self) -> MonitorConfig {
        self.load().unwrap_or_default()
    }

    /// Return the file path this manager reads/writes.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
