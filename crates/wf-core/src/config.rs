use serde::{Deserialize, Serialize};

use crate::bookmarks::Bookmark;

/// Panel configuration persisted to `~/.config/wayfinder/monitor.toml`.
///
/// Holds only operator preferences and saved bookmarks; route computation
/// settings live with the navigation service that consumes them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitorConfig {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

impl MonitorConfig {
    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        self.validate()?;
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Semantic validation for settings that are not fully expressible via
    /// type checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("validation: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Search settings
// ---------------------------------------------------------------------------

/// Station distance restored when the operator clears the input field.
pub const DEFAULT_MAX_STATION_DISTANCE_LS: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Maximum distance from the arrival star, in light seconds, for a
    /// station to qualify in service searches.
    #[serde(default = "default_max_search_distance")]
    pub max_search_distance_from_star_ls: Option<u32>,
    /// Prefer orbital stations over surface settlements in search results.
    #[serde(default)]
    pub prioritize_orbital_stations: bool,
    /// Upper bound on how long a single search invocation may run before it
    /// is reported as failed and the panel freed.
    #[serde(default = "default_search_deadline_secs")]
    pub search_deadline_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_search_distance_from_star_ls: default_max_search_distance(),
            prioritize_orbital_stations: false,
            search_deadline_secs: default_search_deadline_secs(),
        }
    }
}

fn default_max_search_distance() -> Option<u32> {
    Some(DEFAULT_MAX_STATION_DISTANCE_LS)
}
fn default_search_deadline_secs() -> u64 {
    60
}

impl SearchSettings {
    /// Apply raw text from the station distance input field.
    ///
    /// Empty input restores the default distance; text that does not parse as
    /// an unsigned integer is ignored and the stored value kept. Returns true
    /// only when the stored value actually changed, so callers persist on
    /// real edits and nothing else.
    pub fn apply_max_distance_input(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        let parsed = if trimmed.is_empty() {
            Some(DEFAULT_MAX_STATION_DISTANCE_LS)
        } else {
            match trimmed.parse::<u32>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::debug!(input = %raw, "ignoring unparsable station distance");
                    return false;
                }
            }
        };
        if self.max_search_distance_from_star_ls == parsed {
            return false;
        }
        self.max_search_distance_from_star_ls = parsed;
        true
    }

    /// Returns true only when the stored value actually changed.
    pub fn set_prioritize_orbital_stations(&mut self, enabled: bool) -> bool {
        if self.prioritize_orbital_stations == enabled {
            return false;
        }
        self.prioritize_orbital_stations = enabled;
        true
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_deadline_secs == 0 {
            return Err(ConfigError::Validation(
                "search.search_deadline_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
