use crate::core::catalog::{CatalogSet, ResolvedClass};
use crate::core::types::{
    BrailleCell, DecodeMode, RawDetection, TokenKind, UNRESOLVED_MEANING, UNRESOLVED_PATTERN,
};
use crate::error::ResolutionError;

/// Joins a detection with its resolved catalog entry.
pub fn build_cell(detection: &RawDetection, resolved: &ResolvedClass<'_>) -> BrailleCell {
    BrailleCell {
        class_id: detection.class_id,
        binary_pattern: resolved.entry.binary_pattern.clone(),
        meaning: resolved.entry.meaning.clone(),
        kind: resolved.entry.kind,
        confidence: detection.confidence,
        x: detection.x,
        y: detection.y,
        w: detection.w,
        h: detection.h,
    }
}

/// Placeholder for a detection whose class id has no catalog entry. It keeps
/// its geometry so the rest of the page still lines up around it.
pub fn unresolved_cell(detection: &RawDetection) -> BrailleCell {
    BrailleCell {
        class_id: detection.class_id,
        binary_pattern: UNRESOLVED_PATTERN.to_string(),
        meaning: UNRESOLVED_MEANING.to_string(),
        kind: TokenKind::Literal,
        confidence: detection.confidence,
        x: detection.x,
        y: detection.y,
        w: detection.w,
        h: detection.h,
    }
}

/// Resolves and builds one cell.
pub fn resolve_cell(
    catalogs: &CatalogSet,
    detection: &RawDetection,
    mode: DecodeMode,
) -> Result<BrailleCell, ResolutionError> {
    let resolved = catalogs.resolve(detection.class_id, mode)?;
    Ok(build_cell(detection, &resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(class_id: i32) -> RawDetection {
        RawDetection {
            x: 40.0,
            y: 12.5,
            w: 9.0,
            h: 14.0,
            confidence: 0.87,
            class_id,
        }
    }

    #[test]
    fn cell_carries_geometry_and_entry() {
        let catalogs = CatalogSet::builtin().unwrap();
        let cell = resolve_cell(&catalogs, &detection(1), DecodeMode::Grade1).unwrap();
        assert_eq!(cell.meaning, "b");
        assert_eq!(cell.binary_pattern, "110000");
        assert_eq!(cell.kind, TokenKind::Literal);
        assert_eq!((cell.x, cell.y, cell.w, cell.h), (40.0, 12.5, 9.0, 14.0));
        assert_eq!(cell.confidence, 0.87);
        assert!(!cell.is_unresolved());
    }

    #[test]
    fn unknown_class_propagates_resolution_error() {
        let catalogs = CatalogSet::builtin().unwrap();
        let err = resolve_cell(&catalogs, &detection(500), DecodeMode::Grade2).unwrap_err();
        assert_eq!(err.class_id, 500);

        let sentinel = unresolved_cell(&detection(500));
        assert_eq!(sentinel.meaning, "?");
        assert_eq!(sentinel.binary_pattern, "??????");
        assert!(sentinel.is_unresolved());
    }
}
