//! Contains the [`Scanner`], the character-level cursor over a [`SourceFile`].

use std::sync::Arc;

use getset::CopyGetters;
use vuur_base::source_file::SourceFile;

use crate::character::{Character, Position};

/// Is an enumeration of the states a [`Scanner`] can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScannerState {
    /// The end-of-input sentinel has not been produced yet.
    Running,

    /// The end-of-input sentinel has been produced; every further call produces it again.
    Exhausted,
}

/// Is a forward-only cursor producing one position-tagged [`Character`] per call.
///
/// The scanner reads one byte per character and never looks ahead or rewinds. Once the end of
/// the source buffer is reached it keeps returning the same end-of-input sentinel.
#[derive(Debug, Clone, CopyGetters)]
#[allow(missing_copy_implementations)] // an implicit copy would fork the cursor
pub struct Scanner<'a> {
    /// Gets the source file that the scanner is walking over.
    #[get_copy = "pub"]
    source_file: &'a Arc<SourceFile>,

    /// Gets the current state of the scanner.
    #[get_copy = "pub"]
    state: ScannerState,

    // position the next scanned character receives
    next: Position,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned before the first byte of the given source file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self {
            source_file,
            state: ScannerState::Running,
            next: Position::default(),
        }
    }

    /// Advances the cursor by exactly one character and returns it.
    ///
    /// Returns the end-of-input sentinel once the cursor moves past the last byte. The sentinel
    /// sits one past the last offset, on the current line, one column after the last character,
    /// so it never shares a position with a real character.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Character {
        let Some(&value) = self.source_file.as_bytes().get(self.next.offset) else {
            self.state = ScannerState::Exhausted;
            return Character::eof(self.next);
        };

        let character = Character::scanned(value, self.next);

        self.next.offset += 1;
        if character.is_newline() {
            self.next.line += 1;
            self.next.column = 0;
        } else {
            self.next.column += 1;
        }

        character
    }

    /// Checks whether the end-of-input sentinel has not been produced yet.
    #[must_use]
    pub fn running(&self) -> bool { self.state == ScannerState::Running }
}

#[cfg(test)]
mod tests;
