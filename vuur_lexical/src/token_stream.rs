//! Contains the [`TokenStream`] struct, the owned list of tokens handed to a parser.

use std::{ops::Index, sync::Arc};

use derive_more::Deref;
use vuur_base::{diagnostic::Handler, source_file::SourceFile};

use crate::{
    error::{self, AllocationFailure},
    token::Token,
    tokenizer::{Options, Tokenizer},
};

/// Is a list of every real token of a source file, in source order.
///
/// [`crate::token::TokenKind::NoToken`] markers are never stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the given source file.
    ///
    /// This function drains a [`Tokenizer`] built with the given options. Unrecognized
    /// characters are sent to the handler and tokenization carries on past them.
    ///
    /// # Errors
    /// - [`AllocationFailure`]: the token buffer could not grow.
    pub fn tokenize(
        source_file: &Arc<SourceFile>,
        options: Options,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Self, AllocationFailure> {
        let mut tokens = Vec::new();

        for result in Tokenizer::with_options(source_file, options) {
            match result {
                Ok(token) => {
                    if tokens.len() == tokens.capacity() {
                        // grow geometrically, starting with a handful of slots
                        let requested = tokens.capacity().max(8);
                        tokens
                            .try_reserve(requested)
                            .map_err(|_| AllocationFailure { requested })?;
                    }

                    tokens.push(token);
                }
                Err(error) => handler.receive(error.into()),
            }
        }

        Ok(Self { tokens })
    }

    /// Dissolves this struct into the underlying list of tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output { &self.tokens[index] }
}
