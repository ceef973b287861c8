//! Contains the [`Character`] produced by the scanner and its position bookkeeping types.

use std::fmt::Display;

use derive_new::new;
use strum_macros::EnumIter;

/// Is a position of a single character in the source buffer.
///
/// All three components start at zero. The line increments once per consumed `\n`; the column
/// restarts at zero on the character following a `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, new)]
pub struct Position {
    /// The byte offset from the start of the source buffer.
    pub offset: usize,

    /// The zero-based line number.
    pub line: usize,

    /// The zero-based column number within the line.
    pub column: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Is an enumeration of the classes a scanned character can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum CharacterKind {
    /// An ordinary, significant character.
    Char,

    /// A space, tab, carriage return or line feed.
    Whitespace,

    /// The end-of-input sentinel.
    Eof,
}

impl CharacterKind {
    /// Classifies a byte read from the source buffer.
    #[must_use]
    pub fn classify(value: u8) -> Self {
        match value {
            b' ' | b'\t' | b'\r' | b'\n' => Self::Whitespace,
            _ => Self::Char,
        }
    }
}

/// Is a single scanned unit of the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Character {
    /// The byte value of the character; [`Character::EOF_VALUE`] for the end-of-input sentinel.
    pub value: u8,

    /// The position of the character.
    pub position: Position,

    /// The class of the character.
    pub kind: CharacterKind,
}

impl Character {
    /// The value carried by the end-of-input sentinel.
    pub const EOF_VALUE: u8 = b'\0';

    /// Creates a character read from the source buffer, classifying it on the way.
    #[must_use]
    pub fn scanned(value: u8, position: Position) -> Self {
        Self {
            value,
            position,
            kind: CharacterKind::classify(value),
        }
    }

    /// Creates the end-of-input sentinel at the given position.
    #[must_use]
    pub fn eof(position: Position) -> Self {
        Self {
            value: Self::EOF_VALUE,
            position,
            kind: CharacterKind::Eof,
        }
    }

    /// Checks whether this is the end-of-input sentinel.
    #[must_use]
    pub fn is_eof(&self) -> bool { self.kind == CharacterKind::Eof }

    /// Checks whether this character terminates a line.
    #[must_use]
    pub fn is_newline(&self) -> bool { !self.is_eof() && self.value == b'\n' }

    /// Checks whether this is whitespace that does not terminate a line.
    #[must_use]
    pub fn is_inline_whitespace(&self) -> bool {
        self.kind == CharacterKind::Whitespace && self.value != b'\n'
    }

    /// Checks whether this character can start an identifier.
    #[must_use]
    pub fn is_letter(&self) -> bool { !self.is_eof() && self.value.is_ascii_alphabetic() }

    /// Checks whether this character is an ASCII digit.
    #[must_use]
    pub fn is_digit(&self) -> bool { !self.is_eof() && self.value.is_ascii_digit() }

    /// Checks whether this character can continue an identifier.
    #[must_use]
    pub fn is_identifier_continue(&self) -> bool {
        !self.is_eof() && (self.value.is_ascii_alphanumeric() || self.value == b'_')
    }
}
