// File: src/core/context.rs

/// Formatting flags carried through one transliteration scan.
///
/// Owned by a single decode call. `number_mode` is cleared at every word
/// and line boundary; `capitalize_next` stays set until a letter consumes it,
/// even across a line break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransliterationState {
    pub capitalize_next: bool,
    pub number_mode: bool,
}

impl TransliterationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_word(&mut self) {
        self.number_mode = false;
    }

    pub fn end_line(&mut self) {
        self.number_mode = false;
    }

    /// Returns whether a capital sign was pending, clearing it.
    pub fn take_capital(&mut self) -> bool {
        std::mem::take(&mut self.capitalize_next)
    }
}
