//! This crate implements the lexical analysis phase of the Vuur front end.
//!
//! The phase is split in two layers. The [`scanner::Scanner`] walks the immutable source buffer
//! one byte at a time and tags every character with its position. The [`tokenizer::Tokenizer`]
//! pulls those characters and groups them into classified [`token::Token`]s, one token per call.
//! [`token_stream::TokenStream`] drains a tokenizer into an owned list for a parser to consume.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod character;
pub mod error;
pub mod scanner;
pub mod token;
pub mod token_stream;
pub mod tokenizer;
