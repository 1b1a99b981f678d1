// --- File: src/core/catalog.rs
use crate::core::tables;
use crate::core::types::{CatalogEntry, DecodeMode, Grade, Modifier, TokenKind};
use crate::error::{CatalogError, ResolutionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A catalog row as stored in catalog files, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: i32,
    pub pattern: String,
    pub meaning: String,
}

impl CatalogRecord {
    pub fn new(id: i32, pattern: &str, meaning: &str) -> Self {
        Self {
            id,
            pattern: pattern.to_string(),
            meaning: meaning.to_string(),
        }
    }
}

/// Whole-word and part-word dictionaries used to classify meanings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contractions {
    whole_words: HashSet<String>,
    part_words: HashSet<String>,
}

impl Contractions {
    pub fn new<W, P>(whole_words: W, part_words: P) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            whole_words: whole_words.into_iter().map(Into::into).collect(),
            part_words: part_words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            tables::WHOLE_WORDS.iter().copied(),
            tables::PART_WORDS.iter().copied(),
        )
    }

    pub fn is_whole_word(&self, token: &str) -> bool {
        self.whole_words.contains(token)
    }

    pub fn is_part_word(&self, token: &str) -> bool {
        self.part_words.contains(token)
    }

    /// Part-word membership wins over whole-word membership.
    pub fn classify(&self, meaning: &str) -> TokenKind {
        if let Some(modifier) = Modifier::from_token(meaning) {
            TokenKind::Modifier(modifier)
        } else if self.is_part_word(meaning) {
            TokenKind::PartWord
        } else if self.is_whole_word(meaning) {
            TokenKind::WholeWord
        } else {
            TokenKind::Literal
        }
    }

    pub(crate) fn sorted_whole_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.whole_words.iter().cloned().collect();
        words.sort();
        words
    }

    pub(crate) fn sorted_part_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.part_words.iter().cloned().collect();
        words.sort();
        words
    }
}

/// Dense `class id -> entry` table for one grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    grade: Grade,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog, rejecting gaps, duplicates and malformed rows.
    /// Records may arrive in any order.
    pub fn from_records(
        grade: Grade,
        records: &[CatalogRecord],
        contractions: &Contractions,
    ) -> Result<Self, CatalogError> {
        let mut slots: Vec<Option<CatalogEntry>> = vec![None; records.len()];

        for record in records {
            if record.id < 0 {
                return Err(CatalogError::NegativeId { grade, id: record.id });
            }
            if !is_valid_pattern(&record.pattern) {
                return Err(CatalogError::InvalidPattern {
                    grade,
                    id: record.id,
                    pattern: record.pattern.clone(),
                });
            }
            if record.meaning.is_empty() {
                return Err(CatalogError::EmptyMeaning { grade, id: record.id });
            }

            let index = record.id as usize;
            if index >= slots.len() {
                // More ids than rows means some id below this one is absent.
                let missing = first_missing(records);
                return Err(CatalogError::MissingId { grade, id: missing });
            }
            if slots[index].is_some() {
                return Err(CatalogError::DuplicateId { grade, id: record.id });
            }
            slots[index] = Some(CatalogEntry {
                binary_pattern: record.pattern.clone(),
                meaning: record.meaning.clone(),
                kind: contractions.classify(&record.meaning),
            });
        }

        let entries = slots
            .into_iter()
            .enumerate()
            .map(|(id, slot)| {
                slot.ok_or(CatalogError::MissingId {
                    grade,
                    id: id as i32,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { grade, entries })
    }

    /// Builds a catalog from a `(pattern, meaning)` table in id order.
    pub fn from_table(
        grade: Grade,
        table: &[(&str, &str)],
        contractions: &Contractions,
    ) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = table
            .iter()
            .enumerate()
            .map(|(id, (pattern, meaning))| CatalogRecord::new(id as i32, pattern, meaning))
            .collect();
        Self::from_records(grade, &records, contractions)
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<&CatalogEntry> {
        usize::try_from(id).ok().and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// First class id whose meaning is `meaning`.
    pub fn position(&self, meaning: &str) -> Option<i32> {
        self.entries
            .iter()
            .position(|e| e.meaning == meaning)
            .map(|i| i as i32)
    }

    pub fn records(&self) -> Vec<CatalogRecord> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, e)| CatalogRecord::new(id as i32, &e.binary_pattern, &e.meaning))
            .collect()
    }
}

/// A class id resolved against the catalogs for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedClass<'a> {
    pub grade: Grade,
    pub local_id: i32,
    pub entry: &'a CatalogEntry,
}

/// The two grade catalogs plus the dictionaries they were classified with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSet {
    grade1: Catalog,
    grade2: Catalog,
    contractions: Contractions,
}

impl CatalogSet {
    pub fn from_records(
        grade1: &[CatalogRecord],
        grade2: &[CatalogRecord],
        contractions: Contractions,
    ) -> Result<Self, CatalogError> {
        let grade1 = Catalog::from_records(Grade::One, grade1, &contractions)?;
        let grade2 = Catalog::from_records(Grade::Two, grade2, &contractions)?;
        log::info!(
            "loaded braille catalogs: {} grade-1 and {} grade-2 classes",
            grade1.len(),
            grade2.len()
        );
        Ok(Self {
            grade1,
            grade2,
            contractions,
        })
    }

    /// The tables compiled into the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        let contractions = Contractions::builtin();
        let grade1 = Catalog::from_table(Grade::One, tables::GRADE1, &contractions)?;
        let grade2 = Catalog::from_table(Grade::Two, tables::GRADE2, &contractions)?;
        Ok(Self {
            grade1,
            grade2,
            contractions,
        })
    }

    pub fn grade1(&self) -> &Catalog {
        &self.grade1
    }

    pub fn grade2(&self) -> &Catalog {
        &self.grade2
    }

    pub fn contractions(&self) -> &Contractions {
        &self.contractions
    }

    pub fn catalog(&self, grade: Grade) -> &Catalog {
        match grade {
            Grade::One => &self.grade1,
            Grade::Two => &self.grade2,
        }
    }

    /// Id shift applied to grade-2 classes in combined mode.
    pub fn combined_offset(&self) -> usize {
        self.grade1.len()
    }

    pub fn class_count(&self, mode: DecodeMode) -> usize {
        match mode {
            DecodeMode::Grade1 => self.grade1.len(),
            DecodeMode::Grade2 => self.grade2.len(),
            DecodeMode::Combined => self.grade1.len() + self.grade2.len(),
        }
    }

    /// Maps a detector class id to its grade, local id and entry.
    pub fn resolve(
        &self,
        class_id: i32,
        mode: DecodeMode,
    ) -> Result<ResolvedClass<'_>, ResolutionError> {
        let (grade, local_id) = match mode {
            DecodeMode::Grade1 => (Grade::One, class_id),
            DecodeMode::Grade2 => (Grade::Two, class_id),
            DecodeMode::Combined => {
                let offset = self.combined_offset() as i64;
                if i64::from(class_id) >= offset {
                    (Grade::Two, (i64::from(class_id) - offset) as i32)
                } else {
                    (Grade::One, class_id)
                }
            }
        };

        let catalog = self.catalog(grade);
        catalog
            .get(local_id)
            .map(|entry| ResolvedClass {
                grade,
                local_id,
                entry,
            })
            .ok_or(ResolutionError {
                class_id,
                mode,
                grade,
                local_id,
                catalog_len: catalog.len(),
            })
    }

    /// The flat table a combined-mode detector is trained on: grade-1 rows
    /// followed by grade-2 rows.
    pub fn combined(&self) -> Vec<CatalogEntry> {
        self.grade1
            .entries()
            .iter()
            .chain(self.grade2.entries())
            .cloned()
            .collect()
    }

    /// Class id a detector trained for `mode` emits for `meaning`.
    pub fn class_id_for(&self, meaning: &str, mode: DecodeMode) -> Option<i32> {
        match mode {
            DecodeMode::Grade1 => self.grade1.position(meaning),
            DecodeMode::Grade2 => self.grade2.position(meaning),
            DecodeMode::Combined => self.grade1.position(meaning).or_else(|| {
                self.grade2
                    .position(meaning)
                    .map(|id| id + self.combined_offset() as i32)
            }),
        }
    }
}

fn is_valid_pattern(pattern: &str) -> bool {
    pattern.len() == 6 && pattern.bytes().all(|b| b == b'0' || b == b'1')
}

fn first_missing(records: &[CatalogRecord]) -> i32 {
    let present: HashSet<i32> = records.iter().map(|r| r.id).collect();
    (0..)
        .find(|id| !present.contains(id))
        .unwrap_or(records.len() as i32)
}
