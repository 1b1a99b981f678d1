use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{DecodeMode, Grade};

/// A catalog table that cannot be trusted. Raised while building catalogs,
/// before any decode call is accepted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{grade} catalog is missing class id {id} (ids must be dense from 0)")]
    MissingId { grade: Grade, id: i32 },
    #[error("{grade} catalog defines class id {id} more than once")]
    DuplicateId { grade: Grade, id: i32 },
    #[error("{grade} catalog contains negative class id {id}")]
    NegativeId { grade: Grade, id: i32 },
    #[error("{grade} catalog entry {id} has invalid dot pattern {pattern:?}")]
    InvalidPattern {
        grade: Grade,
        id: i32,
        pattern: String,
    },
    #[error("{grade} catalog entry {id} has an empty meaning")]
    EmptyMeaning { grade: Grade, id: i32 },
}

/// A detector class id with no entry in the catalog the active mode selects.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "class id {class_id} ({mode} mode) resolves to {grade} id {local_id}, outside 0..{catalog_len}"
)]
pub struct ResolutionError {
    pub class_id: i32,
    pub mode: DecodeMode,
    pub grade: Grade,
    pub local_id: i32,
    pub catalog_len: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// Failure to bring a decoder up from files or settings.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot encoding error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
