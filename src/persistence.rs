// File: src/persistence.rs
use crate::core::catalog::{CatalogRecord, CatalogSet, Contractions};
use crate::error::LoadError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk form of the catalog set. Rows are validated again on every load.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogFile {
    pub grade1: Vec<CatalogRecord>,
    pub grade2: Vec<CatalogRecord>,
    #[serde(default)]
    pub whole_words: Vec<String>,
    #[serde(default)]
    pub part_words: Vec<String>,
}

impl CatalogFile {
    pub fn from_catalogs(catalogs: &CatalogSet) -> Self {
        Self {
            grade1: catalogs.grade1().records(),
            grade2: catalogs.grade2().records(),
            whole_words: catalogs.contractions().sorted_whole_words(),
            part_words: catalogs.contractions().sorted_part_words(),
        }
    }

    pub fn into_catalogs(self) -> Result<CatalogSet, LoadError> {
        let contractions = Contractions::new(self.whole_words, self.part_words);
        Ok(CatalogSet::from_records(
            &self.grade1,
            &self.grade2,
            contractions,
        )?)
    }
}

/// Loads a hand-edited JSON catalog file.
pub fn load_catalogs_json(path: &Path) -> Result<CatalogSet, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let file: CatalogFile = serde_json::from_reader(reader)?;
    file.into_catalogs()
}

pub fn save_catalogs_json(catalogs: &CatalogSet, path: &Path) -> Result<(), LoadError> {
    let temp_file = persist_target(path)?;
    let mut writer = BufWriter::new(temp_file.as_file());
    serde_json::to_writer_pretty(&mut writer, &CatalogFile::from_catalogs(catalogs))?;
    writer.flush()?;
    drop(writer);
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Writes a compact binary snapshot. The file is written next to its
/// destination and renamed into place, so readers never see half a table.
pub fn save_snapshot(catalogs: &CatalogSet, path: &Path) -> Result<(), LoadError> {
    let temp_file = persist_target(path)?;
    let mut writer = BufWriter::new(temp_file.as_file());
    bincode::serialize_into(&mut writer, &CatalogFile::from_catalogs(catalogs))?;
    writer.flush()?;
    drop(writer);
    temp_file.persist(path).map_err(|e| e.error)?;
    log::info!("saved catalog snapshot to {}", path.display());
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<CatalogSet, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let file: CatalogFile = bincode::deserialize_from(reader)?;
    file.into_catalogs()
}

fn persist_target(path: &Path) -> Result<NamedTempFile, LoadError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;
    Ok(NamedTempFile::new_in(parent_dir)?)
}
