//! TOML-based application configuration.
//!
//! Stores the defaults a ranking call starts from (time window, distance
//! cap, weights), the user's home campus coordinates, and the data file
//! locations. Stored at `~/.config/nearclass/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::ranker::RankConfig;

/// Default ranking knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_time_window")]
    pub time_window_min: u32,
    #[serde(default = "default_max_distance")]
    pub max_distance_m: f64,
    #[serde(default = "default_w_time")]
    pub w_time: f64,
    #[serde(default = "default_w_dist")]
    pub w_dist: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_true")]
    pub include_ongoing: bool,
}

/// Where the user usually is when no coordinates are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusConfig {
    #[serde(default = "default_lat")]
    pub lat: f64,
    #[serde(default = "default_lon")]
    pub lon: f64,
}

/// Data file locations. Empty strings mean "under the data directory".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub meetings_csv: String,
    #[serde(default)]
    pub buildings_csv: String,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub campus: CampusConfig,
    #[serde(default)]
    pub data: DataConfig,
}

fn default_time_window() -> u32 {
    60
}
fn default_max_distance() -> f64 {
    1200.0
}
fn default_w_time() -> f64 {
    0.6
}
fn default_w_dist() -> f64 {
    0.4
}
fn default_top_k() -> usize {
    10
}
fn default_true() -> bool {
    true
}
// Aldrich Park, mid-campus.
fn default_lat() -> f64 {
    33.6461
}
fn default_lon() -> f64 {
    -117.8427
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            time_window_min: default_time_window(),
            max_distance_m: default_max_distance(),
            w_time: default_w_time(),
            w_dist: default_w_dist(),
            top_k: default_top_k(),
            include_ongoing: default_true(),
        }
    }
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            lat: default_lat(),
            lon: default_lon(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ranking: RankingConfig::default(),
            campus: CampusConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/nearclass"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, or fall back to the defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load from disk; a missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::path()?)
    }

    fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            // Only an absent file means "no config yet"; an unreadable one is
            // a real error, not a cue to shadow it with defaults.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The `RankConfig` these defaults describe.
    pub fn rank_config(&self) -> RankConfig {
        RankConfig {
            time_window_min: self.ranking.time_window_min,
            max_distance_m: self.ranking.max_distance_m,
            w_time: self.ranking.w_time,
            w_dist: self.ranking.w_dist,
        }
    }

    /// Get a config value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, keeping the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        let mut parts = key.split('.').peekable();
        let mut current = &mut json;
        loop {
            let Some(part) = parts.next() else {
                return Err(invalid("config key is empty".to_string()));
            };
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| invalid("unknown config key".to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| invalid("unknown config key".to_string()))?;
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            let n = value.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot store '{value}'")))?
                        }
                    }
                    _ => serde_json::Value::String(value.to_string()),
                };
                obj.insert(part.to_string(), new_value);
                break;
            }
            current = current
                .get_mut(part)
                .ok_or_else(|| invalid("unknown config key".to_string()))?;
        }

        *self = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_rank_config() {
        let config = Config::default();
        let rank = config.rank_config();
        assert_eq!(rank, RankConfig::default());
        assert_eq!(config.ranking.top_k, 10);
        assert!(config.ranking.include_ongoing);
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.ranking.time_window_min, 60);
        assert!((parsed.campus.lat - 33.6461).abs() < 1e-9);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let parsed: Config = toml::from_str("[ranking]\ntime_window_min = 30\n").unwrap();
        assert_eq!(parsed.ranking.time_window_min, 30);
        assert!((parsed.ranking.max_distance_m - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn load_distinguishes_missing_from_unreadable() {
        let dir = tempfile::TempDir::new().unwrap();

        // Absent file: defaults.
        let config = Config::load_from(dir.path().join("config.toml")).unwrap();
        assert_eq!(config.ranking.top_k, 10);

        // A directory at the config path fails the read but is not NotFound.
        assert!(matches!(
            Config::load_from(dir.path().to_path_buf()),
            Err(ConfigError::LoadFailed { .. })
        ));

        // Unparseable content is an error, never silently defaulted.
        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "ranking = [not toml").unwrap();
        assert!(matches!(
            Config::load_from(bad),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn get_and_set_by_dotted_key() {
        let mut config = Config::default();
        assert_eq!(config.get("ranking.time_window_min").as_deref(), Some("60"));

        config.set("ranking.time_window_min", "45").unwrap();
        assert_eq!(config.ranking.time_window_min, 45);

        config.set("campus.lat", "33.70").unwrap();
        assert!((config.campus.lat - 33.70).abs() < 1e-9);

        assert!(config.set("ranking.nope", "1").is_err());
        assert!(config.set("ranking.time_window_min", "soon").is_err());
    }
}
