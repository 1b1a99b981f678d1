use crate::core::context::TransliterationState;
use crate::core::tables::{digit_for, UPPERCASE_SIGNS};
use crate::core::types::{BrailleCell, DecodeMode, Line, Modifier, TokenKind};

const ENYE: &str = "ñ";
const ENYE_UPPER: &str = "Ñ";

/// Turns organized braille lines into Filipino text.
#[derive(Debug, Clone, Copy)]
pub struct Transliterator {
    mode: DecodeMode,
}

impl Transliterator {
    pub fn new(mode: DecodeMode) -> Self {
        Self { mode }
    }

    /// Transliterates lines in reading order. Words are joined by one space
    /// and lines by a newline.
    pub fn transliterate(&self, lines: &[Line]) -> String {
        let mut state = TransliterationState::new();
        let mut output = String::new();

        for (line_index, line) in lines.iter().enumerate() {
            let word_count = line.words().len();
            for (word_index, word) in line.words().enumerate() {
                state.start_word();
                let mut buffer = String::new();
                self.scan_word(word.cells, &mut state, &mut buffer, &mut output);
                output.push_str(&buffer);
                if word_index + 1 < word_count {
                    output.push(' ');
                }
            }
            if line_index + 1 < lines.len() {
                output.push('\n');
            }
            state.end_line();
        }

        output
    }

    fn scan_word(
        &self,
        cells: &[BrailleCell],
        state: &mut TransliterationState,
        buffer: &mut String,
        output: &mut String,
    ) {
        let mut i = 0;
        while i < cells.len() {
            let cell = &cells[i];
            i += match cell.kind {
                TokenKind::Modifier(Modifier::Number) => {
                    state.number_mode = true;
                    1
                }
                TokenKind::Modifier(Modifier::Capital) => {
                    state.capitalize_next = true;
                    1
                }
                TokenKind::Modifier(Modifier::Dot4) => {
                    Self::read_dot4(cells.get(i + 1), state, buffer)
                }
                TokenKind::Modifier(Modifier::Dot5) => 1,
                TokenKind::Literal | TokenKind::WholeWord | TokenKind::PartWord => {
                    self.read_literal(cell, state, buffer, output);
                    1
                }
            };
        }
    }

    /// Dot 4 before `n` forms the ñ digraph. Returns the cells consumed.
    fn read_dot4(
        next: Option<&BrailleCell>,
        state: &mut TransliterationState,
        buffer: &mut String,
    ) -> usize {
        match next.map(|c| c.meaning.as_str()) {
            Some("n") => {
                buffer.push_str(if state.take_capital() { ENYE_UPPER } else { ENYE });
                2
            }
            Some("N") => {
                buffer.push_str(ENYE_UPPER);
                2
            }
            _ => {
                state.number_mode = false;
                1
            }
        }
    }

    fn read_literal(
        &self,
        cell: &BrailleCell,
        state: &mut TransliterationState,
        buffer: &mut String,
        output: &mut String,
    ) {
        let capitalized = state.take_capital();
        let mut text = if capitalized {
            capitalize_first(&cell.meaning)
        } else if UPPERCASE_SIGNS.contains(&cell.meaning.as_str()) {
            cell.meaning.to_lowercase()
        } else {
            cell.meaning.clone()
        };

        let digit = if state.number_mode {
            digit_for(&text)
        } else {
            None
        };
        let is_digit = digit.is_some();
        if let Some(digit) = digit {
            text = digit.to_string();
        } else if text.chars().count() > 1 {
            state.number_mode = false;
        }

        // A capitalized contraction no longer matches the dictionary entry.
        let standalone = cell.kind == TokenKind::WholeWord && !capitalized && !is_digit;
        if self.mode.uses_contractions() && standalone {
            if !buffer.is_empty() {
                output.push_str(buffer);
                output.push(' ');
                buffer.clear();
            }
            output.push_str(&text);
            output.push(' ');
        } else {
            buffer.push_str(&text);
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Contractions;

    /// Builds lines from `[line][word][cell]` meanings, spacing cells so the
    /// organizer would produce the same words.
    fn lines(layout: &[&[&[&str]]]) -> Vec<Line> {
        let contractions = Contractions::builtin();
        layout
            .iter()
            .enumerate()
            .map(|(row, words)| {
                let mut cells = Vec::new();
                let mut spans = Vec::new();
                let mut x = 0.0;
                for word in words.iter() {
                    let start = cells.len();
                    for meaning in word.iter() {
                        cells.push(BrailleCell {
                            class_id: 0,
                            binary_pattern: "000000".to_string(),
                            meaning: meaning.to_string(),
                            kind: contractions.classify(meaning),
                            confidence: 1.0,
                            x,
                            y: row as f32 * 100.0,
                            w: 10.0,
                            h: 20.0,
                        });
                        x += 12.0;
                    }
                    spans.push(start..cells.len());
                    x += 40.0;
                }
                Line::from_parts(cells, spans)
            })
            .collect()
    }

    fn grade1(layout: &[&[&[&str]]]) -> String {
        Transliterator::new(DecodeMode::Grade1).transliterate(&lines(layout))
    }

    fn grade2(layout: &[&[&[&str]]]) -> String {
        Transliterator::new(DecodeMode::Grade2).transliterate(&lines(layout))
    }

    #[test]
    fn empty_input_is_empty_text() {
        assert_eq!(grade1(&[]), "");
    }

    #[test]
    fn capital_sign_uppercases_first_letter() {
        assert_eq!(grade1(&[&[&["capital", "b", "a", "h", "a", "y"]]]), "Bahay");
    }

    #[test]
    fn number_sign_reads_letters_as_digits() {
        assert_eq!(grade1(&[&[&["number", "a", "b", "c"]]]), "123");
        assert_eq!(grade1(&[&[&["number", "j", "i"]]]), "09");
        // Letters past j are not digits but do not end the run either.
        assert_eq!(grade1(&[&[&["number", "a", "k", "b"]]]), "1k2");
    }

    #[test]
    fn multi_character_token_ends_number_run() {
        assert_eq!(grade1(&[&[&["number", "a", "ng", "b"]]]), "1ngb");
    }

    #[test]
    fn word_boundary_ends_number_run() {
        assert_eq!(grade1(&[&[&["number", "a", "b"], &["c"]]]), "12 c");
    }

    #[test]
    fn dot4_with_n_forms_enye() {
        assert_eq!(grade1(&[&[&["dot_4", "n"]]]), "ñ");
        assert_eq!(grade1(&[&[&["capital", "dot_4", "n"]]]), "Ñ");
        assert_eq!(grade1(&[&[&["dot_4", "N"]]]), "Ñ");
        assert_eq!(grade1(&[&[&["capital", "p", "a", "dot_4", "n", "a"]]]), "Paña");
    }

    #[test]
    fn dot4_alone_is_silent_and_ends_number_run() {
        assert_eq!(grade1(&[&[&["number", "a", "dot_4", "b"]]]), "1b");
        assert_eq!(grade1(&[&[&["a", "dot_4"]]]), "a");
    }

    #[test]
    fn dot5_is_silent() {
        assert_eq!(grade1(&[&[&["dot_5", "a", "t"]]]), "at");
    }

    #[test]
    fn bare_uppercase_tokens_read_lowercase() {
        assert_eq!(grade1(&[&[&["A", "NG", "Ñ", "o"]]]), "angño");
        assert_eq!(grade1(&[&[&["capital", "NG", "a"]]]), "NGa");
    }

    #[test]
    fn whole_words_stand_alone_in_grade2() {
        assert_eq!(grade2(&[&[&["b", "ang", "a"]]]), "b ang a");
        assert_eq!(grade2(&[&[&["sa"], &["b", "a", "h", "a", "y"]]]), "sa  bahay");
    }

    #[test]
    fn whole_words_fuse_in_grade1() {
        assert_eq!(grade1(&[&[&["b", "ang", "a"]]]), "banga");
    }

    #[test]
    fn part_words_fuse_with_neighbours() {
        assert_eq!(grade2(&[&[&["b", "um", "a", "l", "i", "k"]]]), "bumalik");
        // "ng" is in both dictionaries and still fuses.
        assert_eq!(grade2(&[&[&["a", "ng", "a"]]]), "anga");
    }

    #[test]
    fn capitalized_whole_word_fuses_into_the_word() {
        assert_eq!(grade2(&[&[&["capital", "ang", "b"]]]), "Angb");
        assert_eq!(grade2(&[&[&["capital", "sa"]]]), "Sa");
        assert_eq!(grade2(&[&[&["capital", "b", "ang"]]]), "B ang ");
    }

    #[test]
    fn lines_are_joined_with_newlines() {
        assert_eq!(grade1(&[&[&["a"], &["b"]], &[&["c"]]]), "a b\nc");
    }

    #[test]
    fn capital_sign_carries_across_line_break() {
        assert_eq!(grade1(&[&[&["capital"]], &[&["b", "a"]]]), "\nBa");
    }

    #[test]
    fn number_mode_does_not_carry_across_line_break() {
        assert_eq!(grade1(&[&[&["number"]], &[&["a"]]]), "\na");
    }

    #[test]
    fn unresolved_cells_read_as_question_mark() {
        assert_eq!(grade1(&[&[&["a", "?", "b"]]]), "a?b");
    }
}
