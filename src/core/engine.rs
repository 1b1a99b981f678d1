use crate::config::DecoderConfig;
use crate::core::catalog::CatalogSet;
use crate::core::cell::{resolve_cell, unresolved_cell};
use crate::core::converter::Transliterator;
use crate::core::layout::SpatialOrganizer;
use crate::core::report::format_report;
use crate::core::types::{BrailleCell, DecodeMode, Line, RawDetection};
use crate::error::{ConfigError, LoadError};
use crate::persistence::load_catalogs_json;
use std::path::Path;

/// Everything one decode call produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOutput {
    /// Cells in reading order, for consumers that need per-cell geometry.
    pub lines: Vec<Line>,
    /// Diagnostic cell listing.
    pub detection_text: String,
    /// Transliterated text.
    pub translated_text: String,
    /// Detections whose class id had no catalog entry.
    pub unresolved: usize,
    /// Detections skipped by the confidence threshold.
    pub filtered: usize,
}

impl DecodeOutput {
    pub fn cell_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }
}

// The decoder holds only immutable tables and settings; per-call state lives
// on the stack of `decode`, so one decoder can serve many threads.
#[derive(Debug, Clone)]
pub struct BrailleDecoder {
    catalogs: CatalogSet,
    config: DecoderConfig,
}

impl BrailleDecoder {
    pub fn new(catalogs: CatalogSet, config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { catalogs, config })
    }

    pub fn with_builtin(config: DecoderConfig) -> Result<Self, LoadError> {
        let catalogs = CatalogSet::builtin()?;
        Ok(Self::new(catalogs, config)?)
    }

    /// Loads catalogs from `path`, or uses the built-in tables when the file
    /// does not exist. A file that exists but does not validate is an error.
    pub fn from_file_or_builtin(path: &Path, config: DecoderConfig) -> Result<Self, LoadError> {
        let catalogs = if path.exists() {
            load_catalogs_json(path)?
        } else {
            log::info!(
                "catalog file {} not found, using built-in tables",
                path.display()
            );
            CatalogSet::builtin()?
        };
        Ok(Self::new(catalogs, config)?)
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn decode(&self, detections: &[RawDetection]) -> DecodeOutput {
        self.decode_with_mode(detections, self.config.mode)
    }

    pub fn decode_with_mode(
        &self,
        detections: &[RawDetection],
        mode: DecodeMode,
    ) -> DecodeOutput {
        let (cells, unresolved, filtered) = self.build_cells(detections, mode);

        let lines = SpatialOrganizer::from_config(&self.config).organize(cells);
        let detection_text = format_report(&lines);
        let translated_text = Transliterator::new(mode).transliterate(&lines);

        DecodeOutput {
            lines,
            detection_text,
            translated_text,
            unresolved,
            filtered,
        }
    }

    fn build_cells(
        &self,
        detections: &[RawDetection],
        mode: DecodeMode,
    ) -> (Vec<BrailleCell>, usize, usize) {
        let mut cells = Vec::with_capacity(detections.len());
        let mut unresolved = 0;
        let mut filtered = 0;

        for detection in detections {
            if detection.confidence < self.config.min_confidence {
                filtered += 1;
                continue;
            }
            match resolve_cell(&self.catalogs, detection, mode) {
                Ok(cell) => cells.push(cell),
                Err(err) => {
                    log::warn!("{err}");
                    unresolved += 1;
                    cells.push(unresolved_cell(detection));
                }
            }
        }

        if filtered > 0 {
            log::debug!(
                "skipped {filtered} detections below confidence {}",
                self.config.min_confidence
            );
        }
        (cells, unresolved, filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder(mode: DecodeMode) -> BrailleDecoder {
        BrailleDecoder::with_builtin(DecoderConfig::default().with_mode(mode)).unwrap()
    }

    fn detections(
        decoder: &BrailleDecoder,
        meanings: &[&str],
        mode: DecodeMode,
    ) -> Vec<RawDetection> {
        meanings
            .iter()
            .enumerate()
            .map(|(i, meaning)| RawDetection {
                x: i as f32 * 12.0,
                y: 50.0,
                w: 10.0,
                h: 20.0,
                confidence: 0.75,
                class_id: decoder.catalogs().class_id_for(meaning, mode).unwrap(),
            })
            .collect()
    }

    #[test]
    fn empty_detection_list_decodes_to_nothing() {
        let output = decoder(DecodeMode::Grade1).decode(&[]);
        assert!(output.lines.is_empty());
        assert_eq!(output.detection_text, "Found 0 braille cells\n\n");
        assert_eq!(output.translated_text, "");
        assert_eq!(output.unresolved, 0);
    }

    #[test]
    fn decodes_a_capitalized_word() {
        let decoder = decoder(DecodeMode::Grade1);
        let meanings = ["capital", "b", "a", "h", "a", "y"];
        let input = detections(&decoder, &meanings, DecodeMode::Grade1);
        let output = decoder.decode(&input);
        assert_eq!(output.translated_text, "Bahay");
        assert_eq!(output.cell_count(), 6);
        assert!(output.detection_text.starts_with("Found 6 braille cells\n\n"));
        assert!(output.detection_text.contains("Cell 2: b (75%), Binary: 110000"));
    }

    #[test]
    fn unknown_class_becomes_sentinel_cell() {
        let decoder = decoder(DecodeMode::Grade1);
        let mut input = detections(&decoder, &["a", "b"], DecodeMode::Grade1);
        input[1].class_id = 9_999;
        let output = decoder.decode(&input);
        assert_eq!(output.unresolved, 1);
        assert_eq!(output.translated_text, "a?");
        assert!(output.detection_text.contains("Binary: ??????"));
    }

    #[test]
    fn confidence_threshold_skips_weak_detections() {
        let config = DecoderConfig {
            min_confidence: 0.5,
            ..DecoderConfig::default()
        };
        let decoder = BrailleDecoder::with_builtin(config).unwrap();
        let mut input = detections(&decoder, &["a", "b", "c"], DecodeMode::Grade1);
        input[1].confidence = 0.2;
        let output = decoder.decode(&input);
        assert_eq!(output.filtered, 1);
        assert_eq!(output.translated_text, "ac");
    }

    #[test]
    fn mode_can_be_chosen_per_call() {
        let decoder = decoder(DecodeMode::Grade1);
        let input = detections(&decoder, &["b", "ang", "a"], DecodeMode::Combined);
        let output = decoder.decode_with_mode(&input, DecodeMode::Combined);
        assert_eq!(output.translated_text, "b ang a");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DecoderConfig {
            word_gap_factor: -1.0,
            ..DecoderConfig::default()
        };
        assert!(matches!(
            BrailleDecoder::with_builtin(config),
            Err(LoadError::Config(_))
        ));
    }

    #[test]
    fn missing_catalog_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let decoder = BrailleDecoder::from_file_or_builtin(
            &dir.path().join("absent.json"),
            DecoderConfig::default(),
        )
        .unwrap();
        assert_eq!(decoder.catalogs(), &CatalogSet::builtin().unwrap());
    }
}
