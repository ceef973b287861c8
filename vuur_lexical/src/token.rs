//! Is a module containing the [`Token`] type and all of its related types.

use std::{
    borrow::Cow,
    collections::{BTreeSet, HashMap},
    fmt::Display,
    ops::Range,
    str::FromStr,
    sync::Arc,
};

use derive_new::new;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use vuur_base::source_file::{SourceFile, Span};

use crate::character::Position;

/// Is an enumeration containing all kinds of tokens the tokenizer can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum TokenKind {
    /// Marks a call that produced no token; never a real lexeme.
    NoToken,

    /// A word that is not in the reserved-word table.
    Identifier,

    /// A word found in the reserved-word table.
    Keyword,

    /// `(`
    OpenBracket,

    /// `)`
    CloseBracket,

    /// `\n`
    LineBreak,

    /// `+`, only produced when operators are enabled.
    Plus,

    /// `-`, only produced when operators are enabled.
    Minus,

    /// A run of digits, only produced when numeric literals are enabled.
    NumLiteral,

    /// A single unrecognized character, only produced by the pass-through policy.
    Unknown,
}

/// Is an error that is returned when a string cannot be parsed into a [`TokenKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of token kind.")]
pub struct TokenKindParseError;

impl TokenKind {
    /// Gets the human readable name of the token kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoToken => "no token",
            Self::Identifier => "identifier",
            Self::Keyword => "keyword",
            Self::OpenBracket => "(",
            Self::CloseBracket => ")",
            Self::LineBreak => "line break",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::NumLiteral => "number",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for TokenKind {
    type Err = TokenKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_TOKEN_KIND_MAP: HashMap<&'static str, TokenKind> =
                TokenKind::iter().map(|kind| (kind.as_str(), kind)).collect();
        }

        STRING_TOKEN_KIND_MAP
            .get(s)
            .copied()
            .ok_or(TokenKindParseError)
    }
}

/// Is a classified span over the source buffer.
///
/// The token does not own its text: `source[offset .. offset + length]` is exactly its lexical
/// content. Tokens are plain values and stay valid after the tokenizer moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Token {
    /// The classification of the token.
    pub kind: TokenKind,

    /// The position of the first character of the token.
    pub position: Position,

    /// The number of characters (bytes) the token spans.
    pub length: usize,
}

impl Token {
    /// Creates the empty marker returned by a call that produced nothing.
    #[must_use]
    pub fn none(position: Position) -> Self { Self::new(TokenKind::NoToken, position, 0) }

    /// Checks whether this is the empty marker rather than a real lexeme.
    #[must_use]
    pub fn is_none(&self) -> bool { self.kind == TokenKind::NoToken }

    /// Gets the byte offset the token starts at.
    #[must_use]
    pub fn offset(&self) -> usize { self.position.offset }

    /// Gets the byte offset one past the last character of the token.
    #[must_use]
    pub fn end(&self) -> usize { self.position.offset + self.length }

    /// Gets the byte range of the token in the source buffer.
    #[must_use]
    pub fn range(&self) -> Range<usize> { self.offset()..self.end() }

    /// Slices the bytes of the token out of the source it was produced from.
    ///
    /// Returns [`None`] only if the range is out of bounds.
    #[must_use]
    pub fn bytes<'s>(&self, source: &'s [u8]) -> Option<&'s [u8]> { source.get(self.range()) }

    /// Slices the text of the token out of the source it was produced from.
    ///
    /// Returns [`None`] if the range is out of bounds or splits a multi-byte character, which
    /// only an `Unknown` token over a non-ASCII byte can do. [`Token::bytes`] has no such gap.
    #[must_use]
    pub fn fragment<'s>(&self, source: &'s str) -> Option<&'s str> { source.get(self.range()) }

    /// Creates a [`Span`] covering the token in the given source file.
    #[must_use]
    pub fn span(&self, source_file: &Arc<SourceFile>) -> Option<Span> {
        Span::new(Arc::clone(source_file), self.offset(), self.end())
    }
}

/// Is the table of words that are classified as [`TokenKind::Keyword`] instead of
/// [`TokenKind::Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReservedWords {
    words: BTreeSet<Cow<'static, str>>,
}

lazy_static! {
    static ref DEFAULT_RESERVED_WORDS: ReservedWords = ReservedWords::empty().with_word("procedure");
}

impl Default for ReservedWords {
    /// Gets the reserved words of the language: `procedure`.
    fn default() -> Self { DEFAULT_RESERVED_WORDS.clone() }
}

impl ReservedWords {
    /// Creates a table without any reserved word.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    /// Adds the given word to the table.
    #[must_use]
    pub fn with_word(mut self, word: impl Into<Cow<'static, str>>) -> Self {
        self.insert(word);
        self
    }

    /// Adds the given word to the table, returning whether it was not present yet.
    pub fn insert(&mut self, word: impl Into<Cow<'static, str>>) -> bool {
        self.words.insert(word.into())
    }

    /// Checks whether the given word is reserved. The comparison is exact and case-sensitive.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    /// Iterates over the reserved words in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.words.iter().map(AsRef::as_ref) }

    /// Gets the number of reserved words.
    #[must_use]
    pub fn len(&self) -> usize { self.words.len() }

    /// Checks whether the table has no reserved word.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<W: Into<Cow<'static, str>>> FromIterator<W> for ReservedWords {
    fn from_iter<T: IntoIterator<Item = W>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
