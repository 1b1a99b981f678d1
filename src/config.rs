use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::DecodeMode;
use crate::error::ConfigError;

pub const DEFAULT_LINE_TOLERANCE_FACTOR: f32 = 0.8;
pub const DEFAULT_WORD_GAP_FACTOR: f32 = 1.5;

/// Order in which cells are fed to line clustering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSeed {
    /// Detector output order.
    #[default]
    InputOrder,
    /// Cells stably sorted by y first, so the result does not depend on
    /// detector output order.
    TopDown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub mode: DecodeMode,
    /// Line tolerance as a multiple of the mean cell height.
    pub line_tolerance_factor: f32,
    /// Word gap threshold as a multiple of the line's mean cell width.
    pub word_gap_factor: f32,
    /// Detections below this confidence are skipped.
    pub min_confidence: f32,
    pub line_seed: LineSeed,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            mode: DecodeMode::default(),
            line_tolerance_factor: DEFAULT_LINE_TOLERANCE_FACTOR,
            word_gap_factor: DEFAULT_WORD_GAP_FACTOR,
            min_confidence: 0.0,
            line_seed: LineSeed::default(),
        }
    }
}

impl DecoderConfig {
    pub fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("line_tolerance_factor", self.line_tolerance_factor)?;
        positive("word_gap_factor", self.word_gap_factor)?;
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "min_confidence",
                value: self.min_confidence.to_string(),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_layout_constants() {
        let config = DecoderConfig::default();
        assert_eq!(config.mode, DecodeMode::Grade1);
        assert_eq!(config.line_tolerance_factor, 0.8);
        assert_eq!(config.word_gap_factor, 1.5);
        assert_eq!(config.line_seed, LineSeed::InputOrder);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DecoderConfig =
            serde_json::from_str(r#"{ "mode": "combined", "line_seed": "top_down" }"#).unwrap();
        assert_eq!(config.mode, DecodeMode::Combined);
        assert_eq!(config.line_seed, LineSeed::TopDown);
        assert_eq!(config.word_gap_factor, DEFAULT_WORD_GAP_FACTOR);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let config = DecoderConfig {
            word_gap_factor: 0.0,
            ..DecoderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "word_gap_factor", .. })
        ));

        let config = DecoderConfig {
            min_confidence: 1.5,
            ..DecoderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "min_confidence", .. })
        ));

        let config = DecoderConfig {
            line_tolerance_factor: f32::NAN,
            ..DecoderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "mode": "grade2", "min_confidence": 0.25 }}"#).unwrap();
        let config = DecoderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.mode, DecodeMode::Grade2);
        assert_eq!(config.min_confidence, 0.25);
    }

    #[test]
    fn unreadable_and_unparsable_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            DecoderConfig::from_json_file(&missing),
            Err(ConfigError::Io { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "mode = grade2").unwrap();
        assert!(matches!(
            DecoderConfig::from_json_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
