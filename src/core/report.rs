use crate::core::types::{BrailleCell, Line};
use std::fmt::Write;

/// Plain listing of decoded cells in reading order, numbered from 1.
pub fn format_report(lines: &[Line]) -> String {
    format_cells(lines.iter().flat_map(|line| line.cells()))
}

pub fn format_cells<'a>(cells: impl IntoIterator<Item = &'a BrailleCell>) -> String {
    let cells: Vec<&BrailleCell> = cells.into_iter().collect();
    let mut report = format!("Found {} braille cells\n\n", cells.len());
    for (i, cell) in cells.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            report,
            "Cell {}: {} ({}%), Binary: {}",
            i + 1,
            cell.meaning,
            (cell.confidence * 100.0) as i32,
            cell.binary_pattern
        );
    }
    report
}
