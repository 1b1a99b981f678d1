// src/core/tables.rs
//! Built-in class tables for the Filipino braille detectors.
//!
//! Each table lists `(dot pattern, meaning)` in class-id order, so the row
//! index is the id the detector emits. Dot patterns read dots 1 to 6 left
//! to right.

pub const GRADE1: &[(&str, &str)] = &[
    ("100000", "a"),
    ("110000", "b"),
    ("100100", "c"),
    ("100110", "d"),
    ("100010", "e"),
    ("110100", "f"),
    ("110110", "g"),
    ("110010", "h"),
    ("010100", "i"),
    ("010110", "j"),
    ("101000", "k"),
    ("111000", "l"),
    ("101100", "m"),
    ("101110", "n"),
    ("101010", "o"),
    ("111100", "p"),
    ("111110", "q"),
    ("111010", "r"),
    ("011100", "s"),
    ("011110", "t"),
    ("101001", "u"),
    ("111001", "v"),
    ("010111", "w"),
    ("101101", "x"),
    ("101111", "y"),
    ("101011", "z"),
    ("110111", "ng"),
    ("000001", "capital"),
    ("001111", "number"),
    ("000100", "dot_4"),
    ("000010", "dot_5"),
    ("010011", "."),
    ("010000", ","),
    ("011001", "?"),
    ("011010", "!"),
    ("001000", "'"),
    ("001001", "-"),
    ("011000", ";"),
    ("010010", ":"),
];

pub const GRADE2: &[(&str, &str)] = &[
    ("000001", "capital"),
    ("001111", "number"),
    ("000100", "dot_4"),
    ("000010", "dot_5"),
    ("100000", "a"),
    ("110000", "b"),
    ("100100", "c"),
    ("100110", "d"),
    ("100010", "e"),
    ("110100", "f"),
    ("110110", "g"),
    ("110010", "h"),
    ("010100", "i"),
    ("010110", "j"),
    ("101000", "k"),
    ("111000", "l"),
    ("101100", "m"),
    ("101110", "n"),
    ("101010", "o"),
    ("111100", "p"),
    ("111110", "q"),
    ("111010", "r"),
    ("011100", "s"),
    ("011110", "t"),
    ("101001", "u"),
    ("111001", "v"),
    ("010111", "w"),
    ("101101", "x"),
    ("101111", "y"),
    ("101011", "z"),
    ("110111", "ng"),
    ("111101", "ang"),
    ("011101", "mga"),
    ("100001", "sa"),
    ("111111", "at"),
    ("100011", "ay"),
    ("110001", "na"),
    ("100101", "kung"),
    ("100111", "para"),
    ("110101", "hindi"),
    ("010101", "ito"),
    ("110011", "siya"),
    ("011111", "ako"),
    ("010001", "po"),
    ("001110", "an"),
    ("001010", "in"),
    ("001100", "um"),
    ("001011", "mag"),
    ("001101", "nag"),
    ("000111", "pag"),
    ("000110", "ka"),
    ("000101", "ma"),
    ("010011", "."),
    ("010000", ","),
    ("011001", "?"),
    ("011010", "!"),
];

/// Words a single contraction cell stands for when it is read on its own.
pub const WHOLE_WORDS: &[&str] = &[
    "ang", "mga", "sa", "at", "ay", "na", "kung", "para", "hindi", "ito", "siya", "ako", "po",
    "ng", "pag", "ka",
];

/// Fragments that always fuse with their neighbours, even the ones that
/// also appear in [`WHOLE_WORDS`].
pub const PART_WORDS: &[&str] = &["ng", "an", "in", "um", "mag", "nag", "pag", "ka", "ma"];

/// Uppercase tokens that read as their lowercase letter unless a capital
/// sign precedes them.
pub const UPPERCASE_SIGNS: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "Ñ", "NG",
];

/// Letters read as digits while a number sign is active.
pub fn digit_for(letter: &str) -> Option<&'static str> {
    let digit = match letter {
        "a" => "1",
        "b" => "2",
        "c" => "3",
        "d" => "4",
        "e" => "5",
        "f" => "6",
        "g" => "7",
        "h" => "8",
        "i" => "9",
        "j" => "0",
        _ => return None,
    };
    Some(digit)
}
