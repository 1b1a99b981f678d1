// File: src/core/layout.rs
use crate::config::{DecoderConfig, LineSeed};
use crate::core::types::{mean, BrailleCell, Line};
use std::ops::Range;

/// Groups cells into reading-order lines and words.
#[derive(Debug, Clone, Copy)]
pub struct SpatialOrganizer {
    line_tolerance_factor: f32,
    word_gap_factor: f32,
    seed: LineSeed,
}

/// A line under construction, tracking the running mean of its y values.
struct LineAccumulator {
    cells: Vec<BrailleCell>,
    sum_y: f32,
}

impl LineAccumulator {
    fn new(cell: BrailleCell) -> Self {
        let sum_y = cell.y;
        Self {
            cells: vec![cell],
            sum_y,
        }
    }

    fn mean_y(&self) -> f32 {
        self.sum_y / self.cells.len() as f32
    }

    fn push(&mut self, cell: BrailleCell) {
        self.sum_y += cell.y;
        self.cells.push(cell);
    }
}

impl SpatialOrganizer {
    pub fn new(line_tolerance_factor: f32, word_gap_factor: f32, seed: LineSeed) -> Self {
        Self {
            line_tolerance_factor,
            word_gap_factor,
            seed,
        }
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(
            config.line_tolerance_factor,
            config.word_gap_factor,
            config.line_seed,
        )
    }

    /// Greedy single-pass clustering. Each cell joins the first line (in
    /// creation order) whose running mean y is within tolerance, otherwise it
    /// opens a new line. Rows come back x-sorted and ordered by mean y.
    ///
    /// With [`LineSeed::InputOrder`] the result depends on the order the
    /// detector emitted the cells; [`LineSeed::TopDown`] removes that.
    pub fn cluster_lines(&self, mut cells: Vec<BrailleCell>) -> Vec<Vec<BrailleCell>> {
        if cells.is_empty() {
            return Vec::new();
        }

        let avg_height = mean(cells.iter().map(|c| c.h));
        let tolerance = self.line_tolerance_factor * avg_height;

        if self.seed == LineSeed::TopDown {
            cells.sort_by(|a, b| a.y.total_cmp(&b.y));
        }

        let mut lines: Vec<LineAccumulator> = Vec::new();
        for cell in cells {
            match lines
                .iter_mut()
                .find(|line| (line.mean_y() - cell.y).abs() <= tolerance)
            {
                Some(line) => line.push(cell),
                None => lines.push(LineAccumulator::new(cell)),
            }
        }

        // Stable sort keeps creation order for lines with equal mean y.
        lines.sort_by(|a, b| a.mean_y().total_cmp(&b.mean_y()));

        log::debug!(
            "clustered cells into {} lines (tolerance {:.2}px)",
            lines.len(),
            tolerance
        );

        lines
            .into_iter()
            .map(|line| {
                let mut row = line.cells;
                row.sort_by(|a, b| a.x.total_cmp(&b.x));
                row
            })
            .collect()
    }

    /// Splits an x-sorted row into word spans. A word ends after a cell whose
    /// gap to the next cell exceeds `word_gap_factor` times the row's mean
    /// cell width.
    pub fn segment_words(&self, row: &[BrailleCell]) -> Vec<Range<usize>> {
        if row.is_empty() {
            return Vec::new();
        }

        let avg_width = mean(row.iter().map(|c| c.w));
        let threshold = self.word_gap_factor * avg_width;

        let mut spans = Vec::new();
        let mut start = 0;
        for (i, pair) in row.windows(2).enumerate() {
            if pair[0].gap_to(&pair[1]) > threshold {
                spans.push(start..i + 1);
                start = i + 1;
            }
        }
        spans.push(start..row.len());

        log::debug!(
            "segmented {} cells into {} words (gap threshold {:.2}px)",
            row.len(),
            spans.len(),
            threshold
        );
        spans
    }

    /// Clusters cells into lines and segments every line into words.
    pub fn organize(&self, cells: Vec<BrailleCell>) -> Vec<Line> {
        self.cluster_lines(cells)
            .into_iter()
            .map(|row| {
                let spans = self.segment_words(&row);
                Line::from_parts(row, spans)
            })
            .collect()
    }
}

impl Default for SpatialOrganizer {
    fn default() -> Self {
        Self::from_config(&DecoderConfig::default())
    }
}
