use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read layout file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid layout file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown colour name '{name}' for channel {channel}")]
    UnknownColor { channel: u32, name: String },

    #[error("panel '{panel}' refers to channel {channel}, which is not configured")]
    UnknownChannel { panel: String, channel: u32 },
}

// ---------------------------------------------------------------------------
// Channel: one (time, signal) column pair
// ---------------------------------------------------------------------------

/// Column aliases and styling for one EMG channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub id: u32,
    /// Acceptable names for the time column, highest priority first.
    /// Left empty in a layout file, it takes the default spellings for `id`.
    #[serde(default)]
    pub time_aliases: Vec<String>,
    /// Acceptable names for the signal column, highest priority first.
    #[serde(default)]
    pub signal_aliases: Vec<String>,
    /// CSS colour name (e.g. `"blue"`). `None` picks one from the palette.
    #[serde(default)]
    pub color: Option<String>,
}

impl ChannelConfig {
    /// Default aliases tolerate bracket, underscore and plain suffix spellings.
    pub fn with_default_aliases(id: u32, color: Option<&str>) -> Self {
        Self {
            id,
            time_aliases: vec![
                format!("X[s]_{id}"),
                format!("X_s_{id}"),
                format!("X{id}"),
                format!("Time{id}"),
            ],
            signal_aliases: vec![
                format!("EMG{id}"),
                format!("EMG_{id}"),
                format!("EMG[mV]_{id}"),
                format!("Signal{id}"),
            ],
            color: color.map(str::to_string),
        }
    }

    /// Fill empty alias lists with the default spellings for this channel.
    pub fn fill_default_aliases(&mut self) {
        let defaults = Self::with_default_aliases(self.id, None);
        if self.time_aliases.is_empty() {
            self.time_aliases = defaults.time_aliases;
        }
        if self.signal_aliases.is_empty() {
            self.signal_aliases = defaults.signal_aliases;
        }
    }

    pub fn time_field(&self) -> String {
        format!("time-{}", self.id)
    }

    pub fn signal_field(&self) -> String {
        format!("signal-{}", self.id)
    }

    /// Legend label, e.g. `EMG21 (X21)`.
    pub fn trace_name(&self) -> String {
        format!("EMG{0} (X{0})", self.id)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// One row of the figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    pub title: String,
    /// Channel ids plotted in this row, in drawing order.
    pub channels: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

/// A preset zoom button. `seconds == None` means "show everything".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangePreset {
    pub label: String,
    #[serde(default)]
    pub seconds: Option<f64>,
}

impl RangePreset {
    fn seconds(label: &str, seconds: f64) -> Self {
        Self {
            label: label.to_string(),
            seconds: Some(seconds),
        }
    }

    fn all() -> Self {
        Self {
            label: "all".to_string(),
            seconds: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level configuration
// ---------------------------------------------------------------------------

/// Everything the load → resolve → coerce → chart pipeline needs.
///
/// Every field is optional in the JSON form; missing ones take the
/// value from [`EmgConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmgConfig {
    pub data_path: PathBuf,
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub legend: LegendPosition,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub channels: Vec<ChannelConfig>,
    pub panels: Vec<PanelConfig>,
    pub range_presets: Vec<RangePreset>,
    pub range_slider: bool,
}

impl Default for EmgConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            title: "EMG Time Series (Interactive)".to_string(),
            width: 1200.0,
            height: 800.0,
            legend: LegendPosition::RightTop,
            x_axis_title: "Time (s)".to_string(),
            y_axis_title: "EMG".to_string(),
            channels: vec![
                ChannelConfig::with_default_aliases(21, Some("blue")),
                ChannelConfig::with_default_aliases(22, Some("orange")),
                ChannelConfig::with_default_aliases(31, Some("orange")),
                ChannelConfig::with_default_aliases(32, Some("blue")),
            ],
            panels: vec![
                PanelConfig {
                    title: "Series 21 & 22".to_string(),
                    channels: vec![21, 22],
                },
                PanelConfig {
                    title: "Series 32 & 31".to_string(),
                    channels: vec![32, 31],
                },
            ],
            range_presets: vec![
                RangePreset::seconds("1s", 1.0),
                RangePreset::seconds("5s", 5.0),
                RangePreset::seconds("10s", 10.0),
                RangePreset::all(),
            ],
            range_slider: true,
        }
    }
}

impl EmgConfig {
    /// Read a JSON layout file. Fields absent from the file keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: EmgConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        for channel in &mut config.channels {
            channel.fill_default_aliases();
        }
        config.validate()?;
        Ok(config)
    }

    pub fn channel(&self, id: u32) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Check that every panel only names configured channels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for panel in &self.panels {
            for &id in &panel.channels {
                if self.channel(id).is_none() {
                    return Err(ConfigError::UnknownChannel {
                        panel: panel.title.clone(),
                        channel: id,
                    });
                }
            }
        }
        Ok(())
    }
}

/// `~/Desktop/data.csv`, or `./Desktop/data.csv` when no home directory is known.
pub fn default_data_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join("Desktop")
        .join("data.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_two_rows() {
        let config = EmgConfig::default();
        assert_eq!(config.panels.len(), 2);
        assert_eq!(config.panels[0].channels, vec![21, 22]);
        assert_eq!(config.panels[1].channels, vec![32, 31]);
        assert!(config.validate().is_ok());
        assert!(config.data_path.ends_with("Desktop/data.csv"));
    }

    #[test]
    fn default_aliases_have_priority_order() {
        let ch = ChannelConfig::with_default_aliases(21, None);
        assert_eq!(ch.time_aliases[0], "X[s]_21");
        assert_eq!(ch.time_aliases[3], "Time21");
        assert_eq!(ch.signal_aliases[0], "EMG21");
        assert_eq!(ch.signal_aliases[1], "EMG_21");
        assert_eq!(ch.trace_name(), "EMG21 (X21)");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(
            &path,
            r#"{ "title": "Left leg", "data_path": "/tmp/legs.csv", "legend": "left_bottom" }"#,
        )
        .unwrap();

        let config = EmgConfig::from_json_file(&path).unwrap();
        assert_eq!(config.title, "Left leg");
        assert_eq!(config.data_path, PathBuf::from("/tmp/legs.csv"));
        assert_eq!(config.legend, LegendPosition::LeftBottom);
        assert_eq!(config.channels.len(), 4);
        assert_eq!(config.x_axis_title, "Time (s)");
    }

    #[test]
    fn channel_with_only_colour_keeps_default_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(
            &path,
            r#"{
                "channels": [
                    { "id": 21, "color": "red" },
                    { "id": 22, "signal_aliases": ["Biceps"] }
                ],
                "panels": [ { "title": "Arm", "channels": [21, 22] } ]
            }"#,
        )
        .unwrap();

        let config = EmgConfig::from_json_file(&path).unwrap();
        let ch21 = config.channel(21).unwrap();
        assert_eq!(ch21.color.as_deref(), Some("red"));
        assert_eq!(ch21.time_aliases[0], "X[s]_21");
        assert_eq!(ch21.signal_aliases[1], "EMG_21");
        let ch22 = config.channel(22).unwrap();
        assert_eq!(ch22.signal_aliases, vec!["Biceps"]);
        assert_eq!(ch22.time_aliases.len(), 4);
    }

    #[test]
    fn panel_with_unknown_channel_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(
            &path,
            r#"{ "panels": [ { "title": "Bad", "channels": [21, 99] } ] }"#,
        )
        .unwrap();

        let err = EmgConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownChannel { channel: 99, .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = EmgConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
