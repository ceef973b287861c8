//! Strategies generating raw source text for the scanner and tokenizer.

use proptest::{
    arbitrary::any,
    collection::vec,
    prop_oneof,
    strategy::{BoxedStrategy, Just, Strategy},
};

/// Generates arbitrary single-byte source text, including whitespace, brackets, digits,
/// operators and symbols that no token starts with.
#[must_use]
pub fn ascii_source() -> BoxedStrategy<String> { "[ -~\t\r\n]{0,64}".boxed() }

/// Generates arbitrary source bytes. Printable ASCII and line breaks are mixed in so that real
/// tokens show up next to bytes that are not valid UTF-8.
#[must_use]
pub fn byte_source() -> BoxedStrategy<Vec<u8>> {
    vec(prop_oneof![any::<u8>(), b' '..=b'~', Just(b'\n')], 0..64).boxed()
}

/// Generates source text made only of spaces, tabs and carriage returns.
#[must_use]
pub fn inline_whitespace() -> BoxedStrategy<String> { "[ \t\r]{0,32}".boxed() }

/// Generates source text that only contains characters the tokenizer understands: words,
/// brackets, line breaks and inline whitespace.
#[must_use]
pub fn well_formed_source() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            "[A-Za-z][A-Za-z0-9_]{0,8}".boxed(),
            Just("(".to_owned()).boxed(),
            Just(")".to_owned()).boxed(),
            Just("\n".to_owned()).boxed(),
            inline_whitespace(),
        ],
        0..24,
    )
    .prop_map(|parts| {
        // words directly next to each other would merge into one
        parts.join(" ")
    })
    .boxed()
}
