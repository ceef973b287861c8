//! Contains the [`Tokenizer`], which groups scanned characters into tokens one call at a time.

use std::sync::Arc;

use getset::{CopyGetters, Getters};
use vuur_base::source_file::{SourceFile, Span};

use crate::{
    character::Character,
    error::UnrecognizedCharacter,
    scanner::Scanner,
    token::{ReservedWords, Token, TokenKind},
};

/// Is an enumeration of the ways the tokenizer can treat a character no token starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Unrecognized {
    /// Returns an [`UnrecognizedCharacter`] error for the call.
    #[default]
    Report,

    /// Drops the character and returns [`TokenKind::NoToken`] for the call.
    Skip,

    /// Emits the character as a one-character [`TokenKind::Unknown`] token.
    PassThrough,
}

/// Is the configuration of a [`Tokenizer`].
///
/// The default configuration recognizes identifiers, the `procedure` keyword, brackets and line
/// breaks, and reports every other character.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Options {
    /// Gets the table of words classified as keywords.
    #[get = "pub"]
    reserved_words: ReservedWords,

    /// Gets whether digit runs produce [`TokenKind::NumLiteral`] tokens.
    #[get_copy = "pub"]
    numeric_literals: bool,

    /// Gets whether `+` and `-` produce [`TokenKind::Plus`] and [`TokenKind::Minus`] tokens.
    #[get_copy = "pub"]
    operators: bool,

    /// Gets the treatment of characters no token starts with.
    #[get_copy = "pub"]
    unrecognized: Unrecognized,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            reserved_words: ReservedWords::default(),
            numeric_literals: false,
            operators: false,
            unrecognized: Unrecognized::Report,
        }
    }
}

impl Options {
    /// Replaces the reserved-word table.
    #[must_use]
    pub fn with_reserved_words(mut self, reserved_words: ReservedWords) -> Self {
        self.reserved_words = reserved_words;
        self
    }

    /// Enables or disables [`TokenKind::NumLiteral`] tokens.
    #[must_use]
    pub fn with_numeric_literals(mut self, numeric_literals: bool) -> Self {
        self.numeric_literals = numeric_literals;
        self
    }

    /// Enables or disables [`TokenKind::Plus`] and [`TokenKind::Minus`] tokens.
    #[must_use]
    pub fn with_operators(mut self, operators: bool) -> Self {
        self.operators = operators;
        self
    }

    /// Sets the treatment of characters no token starts with.
    #[must_use]
    pub fn with_unrecognized(mut self, unrecognized: Unrecognized) -> Self {
        self.unrecognized = unrecognized;
        self
    }
}

/// Is an enumeration of the states the [`Tokenizer`] moves through during one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenizerState {
    /// No token is pending.
    Idle,

    /// A multi-character token is being built.
    Accumulating,

    /// A token is ready to be returned.
    Emitted,
}

/// Is a pull-style tokenizer over a [`Scanner`].
///
/// The scanner cannot look ahead, so the tokenizer consumes a character first and inspects it
/// afterwards. The character that ended a token is kept and starts the next call.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,

    // consumed from the scanner but not part of any token yet
    pending: Option<Character>,

    /// Gets the state the last call left the tokenizer in.
    #[get_copy = "pub"]
    state: TokenizerState,

    /// Gets the configuration of the tokenizer.
    #[get = "pub"]
    options: Options,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer with the default [`Options`].
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self::with_options(source_file, Options::default())
    }

    /// Creates a tokenizer with the given [`Options`].
    #[must_use]
    pub fn with_options(source_file: &'a Arc<SourceFile>, options: Options) -> Self {
        Self {
            scanner: Scanner::new(source_file),
            pending: None,
            state: TokenizerState::Idle,
            options,
        }
    }

    /// Gets the source file the tokenizer reads from.
    #[must_use]
    pub fn source_file(&self) -> &'a Arc<SourceFile> { self.scanner.source_file() }

    /// Checks whether the scanner has not produced the end-of-input sentinel yet.
    ///
    /// A token may still be returned by the call during which this flips to `false`.
    #[must_use]
    pub fn running(&self) -> bool { self.scanner.running() }

    fn advance(&mut self) -> Character {
        let character = self.scanner.next();
        self.pending = Some(character);
        character
    }

    fn current(&mut self) -> Character {
        match self.pending {
            Some(character) => character,
            None => self.advance(),
        }
    }

    /// Extends a token starting at `first` while `continues` accepts the next character.
    fn accumulate(
        &mut self,
        first: Character,
        kind: TokenKind,
        continues: impl Fn(&Character) -> bool,
    ) -> Token {
        self.state = TokenizerState::Accumulating;

        let mut length = 1;
        while continues(&self.advance()) {
            length += 1;
        }

        Token::new(kind, first.position, length)
    }

    fn single(&mut self, character: Character, kind: TokenKind) -> Token {
        self.advance();
        Token::new(kind, character.position, 1)
    }

    fn identifier_or_keyword(&mut self, first: Character) -> Token {
        let mut token = self.accumulate(
            first,
            TokenKind::Identifier,
            Character::is_identifier_continue,
        );

        let is_reserved = token
            .bytes(self.scanner.source_file().as_bytes())
            .and_then(|word| std::str::from_utf8(word).ok())
            .is_some_and(|word| self.options.reserved_words.contains(word));

        if is_reserved {
            token.kind = TokenKind::Keyword;
        }

        token
    }

    fn unrecognized(&mut self, character: Character) -> Result<Token, UnrecognizedCharacter> {
        self.advance();

        match self.options.unrecognized {
            Unrecognized::Report => Err(UnrecognizedCharacter {
                position: character.position,
                value: character.value,
                span: Span::covering(
                    Arc::clone(self.scanner.source_file()),
                    character.position.offset,
                ),
            }),
            Unrecognized::Skip => Ok(Token::none(character.position)),
            Unrecognized::PassThrough => Ok(Token::new(TokenKind::Unknown, character.position, 1)),
        }
    }

    /// Produces the next token.
    ///
    /// Inline whitespace is skipped; a line feed is returned as a [`TokenKind::LineBreak`]
    /// token. At the end of input the returned token is [`TokenKind::NoToken`] with length zero
    /// and [`Tokenizer::running`] turns `false`.
    ///
    /// # Errors
    /// - [`UnrecognizedCharacter`]: the next significant character starts no token and the
    ///   [`Unrecognized::Report`] policy is active. The character is consumed.
    pub fn next_token(&mut self) -> Result<Token, UnrecognizedCharacter> {
        self.state = TokenizerState::Idle;

        let mut character = self.current();
        while character.is_inline_whitespace() {
            character = self.advance();
        }

        let result = if character.is_eof() {
            Ok(Token::none(character.position))
        } else if character.is_letter() {
            Ok(self.identifier_or_keyword(character))
        } else if self.options.numeric_literals && character.is_digit() {
            Ok(self.accumulate(character, TokenKind::NumLiteral, Character::is_digit))
        } else {
            match character.value {
                b'(' => Ok(self.single(character, TokenKind::OpenBracket)),
                b')' => Ok(self.single(character, TokenKind::CloseBracket)),
                b'\n' => Ok(self.single(character, TokenKind::LineBreak)),
                b'+' if self.options.operators => Ok(self.single(character, TokenKind::Plus)),
                b'-' if self.options.operators => Ok(self.single(character, TokenKind::Minus)),
                _ => self.unrecognized(character),
            }
        };

        self.state = match &result {
            Ok(token) if !token.is_none() => TokenizerState::Emitted,
            _ => TokenizerState::Idle,
        };

        result
    }
}

/// Yields every real token, skipping the [`TokenKind::NoToken`] markers, until the end of input.
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, UnrecognizedCharacter>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.running() {
            match self.next_token() {
                Ok(token) if token.is_none() => {}
                result => return Some(result),
            }
        }

        None
    }
}
