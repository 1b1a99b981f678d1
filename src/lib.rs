// src/lib.rs
//! Decodes classified braille-cell detections into Filipino text.

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::config::{DecoderConfig, LineSeed};
pub use crate::core::catalog::{Catalog, CatalogRecord, CatalogSet, Contractions, ResolvedClass};
pub use crate::core::engine::{BrailleDecoder, DecodeOutput};
pub use crate::core::types::{BrailleCell, DecodeMode, Grade, Line, RawDetection, TokenKind, Word};
pub use crate::error::{CatalogError, ConfigError, LoadError, ResolutionError};
