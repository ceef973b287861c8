//! Contains all kinds of lexical errors that can occur while tokenizing the source code.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use vuur_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

use crate::character::Position;

/// The source code contains a character that no token can start with.
///
/// The offending character has already been consumed when this error is produced, so the
/// tokenizer can keep going.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnrecognizedCharacter {
    /// The position of the offending character.
    pub position: Position,

    /// The byte value of the offending character.
    pub value: u8,

    /// The span of the whole character containing the offending byte.
    pub span: Option<Span>,
}

impl UnrecognizedCharacter {
    fn describe(&self) -> String {
        if self.value.is_ascii() {
            format!(
                "found an unrecognized character `{}`",
                self.value.escape_ascii()
            )
        } else {
            format!(
                "found an unrecognized byte `0x{:02x}` at {}",
                self.value, self.position
            )
        }
    }
}

impl Display for UnrecognizedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = Message::new(Severity::Error, self.describe());

        match &self.span {
            Some(span) => write!(
                f,
                "{message}\n{}",
                SourceCodeDisplay::new(span, Some("no token starts with this character"))
            ),
            None => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for UnrecognizedCharacter {}

/// The token buffer could not grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[error("failed to allocate room for {requested} more tokens")]
pub struct AllocationFailure {
    /// The number of additional token slots that were requested.
    pub requested: usize,
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnrecognizedCharacter(UnrecognizedCharacter),
    AllocationFailure(AllocationFailure),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCharacter(err) => write!(f, "{err}"),
            Self::AllocationFailure(err) => write!(f, "{}", Message::new(Severity::Error, err)),
        }
    }
}

impl std::error::Error for Error {}
