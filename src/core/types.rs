// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Meaning given to cells whose class id could not be resolved.
pub const UNRESOLVED_MEANING: &str = "?";
/// Dot pattern given to cells whose class id could not be resolved.
pub const UNRESOLVED_PATTERN: &str = "??????";

/// One detector box, center-form, in source pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub confidence: f32,
    pub class_id: i32,
}

/// Which braille dictionary a class id was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    One,
    Two,
}

impl Grade {
    pub fn number(self) -> u8 {
        match self {
            Grade::One => 1,
            Grade::Two => 2,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "grade-{}", self.number())
    }
}

/// The dictionary set the detector was trained against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    #[default]
    Grade1,
    Grade2,
    Combined,
}

impl DecodeMode {
    /// Whether whole-word contractions stand alone in this mode.
    pub fn uses_contractions(self) -> bool {
        !matches!(self, DecodeMode::Grade1)
    }
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeMode::Grade1 => "grade1",
            DecodeMode::Grade2 => "grade2",
            DecodeMode::Combined => "combined",
        };
        f.write_str(name)
    }
}

/// Cells that change how later cells read without producing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Capital,
    Number,
    Dot4,
    Dot5,
}

impl Modifier {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "capital" => Some(Modifier::Capital),
            "number" => Some(Modifier::Number),
            "dot_4" => Some(Modifier::Dot4),
            "dot_5" => Some(Modifier::Dot5),
            _ => None,
        }
    }
}

/// Category of a meaning token, fixed when the catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Literal,
    Modifier(Modifier),
    WholeWord,
    PartWord,
}

/// One row of a class catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub binary_pattern: String,
    pub meaning: String,
    pub kind: TokenKind,
}

/// A detection joined with its catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BrailleCell {
    pub class_id: i32,
    pub binary_pattern: String,
    pub meaning: String,
    pub kind: TokenKind,
    pub confidence: f32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BrailleCell {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Horizontal gap between this cell and the one that follows it on a line.
    pub fn gap_to(&self, next: &BrailleCell) -> f32 {
        next.x - self.right()
    }

    pub fn is_unresolved(&self) -> bool {
        self.binary_pattern == UNRESOLVED_PATTERN
    }
}

/// A row of cells sorted by x, partitioned into words.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    cells: Vec<BrailleCell>,
    word_spans: Vec<Range<usize>>,
}

impl Line {
    /// Callers guarantee `cells` is x-sorted and `word_spans` tiles it.
    pub(crate) fn from_parts(cells: Vec<BrailleCell>, word_spans: Vec<Range<usize>>) -> Self {
        Self { cells, word_spans }
    }

    pub fn cells(&self) -> &[BrailleCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn mean_y(&self) -> f32 {
        mean(self.cells.iter().map(|c| c.y))
    }

    pub fn word_spans(&self) -> &[Range<usize>] {
        &self.word_spans
    }

    pub fn words(&self) -> impl ExactSizeIterator<Item = Word<'_>> + '_ {
        self.word_spans.iter().map(move |span| Word {
            start: span.start,
            cells: &self.cells[span.clone()],
        })
    }
}

/// A contiguous run of a line's cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Word<'a> {
    /// Index of the first cell within its line.
    pub start: usize,
    pub cells: &'a [BrailleCell],
}

impl<'a> Word<'a> {
    pub fn meanings(&self) -> Vec<&'a str> {
        self.cells.iter().map(|c| c.meaning.as_str()).collect()
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0f32, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}
