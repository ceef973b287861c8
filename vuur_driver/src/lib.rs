//! Drives the lexical phase from the command line: loads a source, then dumps either the
//! scanner's characters or the tokenizer's tokens.

use std::{
    cell::Cell,
    fmt::Display,
    fs::File,
    io::Write,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

pub use clap::Parser;
use vuur_base::{
    diagnostic::Handler,
    log::{Message, Severity},
    source_file::SourceFile,
};
use vuur_lexical::{
    character::Character,
    scanner::Scanner,
    token::{ReservedWords, Token, TokenKind},
    token_stream::TokenStream,
    tokenizer::{Options, Unrecognized},
};

/// The source used when no input file is given.
pub const DEMO_SOURCE: &str = "one two\n three";

/// The treatment of characters no token starts with, as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum UnrecognizedArgument {
    /// Print an error for every unrecognized character.
    Report,

    /// Drop unrecognized characters silently.
    Skip,

    /// Print unrecognized characters as `unknown` tokens.
    PassThrough,
}

impl From<UnrecognizedArgument> for Unrecognized {
    fn from(argument: UnrecognizedArgument) -> Self {
        match argument {
            UnrecognizedArgument::Report => Self::Report,
            UnrecognizedArgument::Skip => Self::Skip,
            UnrecognizedArgument::PassThrough => Self::PassThrough,
        }
    }
}

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, clap::Parser)]
#[clap(
    name = "vuur",
    about = "Vuur lexical front end.",
    author = "66011245@kmitl.ac.th"
)]
pub struct Argument {
    /// The input file to tokenize. A built-in demo source is used when omitted.
    pub file: Option<PathBuf>,

    /// Prints the characters produced by the scanner instead of the tokens.
    #[clap(long = "dump-characters")]
    pub dump_characters: bool,

    /// Turns digit runs into number tokens.
    #[clap(long = "numeric-literals")]
    pub numeric_literals: bool,

    /// Turns `+` and `-` into operator tokens.
    #[clap(long = "operators")]
    pub operators: bool,

    /// What to do with characters no token starts with.
    #[clap(long = "unrecognized", value_enum, default_value_t = UnrecognizedArgument::Report)]
    pub unrecognized: UnrecognizedArgument,

    /// Adds a word to the reserved-word table. Can be repeated.
    #[clap(long = "keyword", value_name = "WORD")]
    pub keywords: Vec<String>,

    /// Only prints tokens of the given kind, e.g. `identifier` or `keyword`.
    #[clap(long = "only", value_name = "KIND")]
    pub only: Option<TokenKind>,
}

impl Argument {
    /// Builds the tokenizer configuration described by the arguments.
    #[must_use]
    pub fn options(&self) -> Options {
        let reserved_words = self
            .keywords
            .iter()
            .fold(ReservedWords::default(), |words, word| {
                words.with_word(word.clone())
            });

        Options::default()
            .with_reserved_words(reserved_words)
            .with_numeric_literals(self.numeric_literals)
            .with_operators(self.operators)
            .with_unrecognized(self.unrecognized.into())
    }
}

/// A struct that implements [`Handler`] but prints all the message to the standard error stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Printer {
    printed: Cell<bool>,
}

impl Printer {
    /// Creates a new [`Printer`].
    fn new() -> Self {
        Self {
            printed: Cell::new(false),
        }
    }

    fn has_printed(&self) -> bool { self.printed.get() }
}

impl<E: Display> Handler<E> for Printer {
    fn receive(&self, error: E) {
        eprintln!("{error}");
        self.printed.set(true);
    }
}

fn load(argument: &Argument) -> Result<Arc<SourceFile>, String> {
    let Some(path) = &argument.file else {
        return Ok(SourceFile::in_memory("<demo>", DEMO_SOURCE));
    };

    let file = File::open(path).map_err(|error| format!("{}: {error}", path.display()))?;

    SourceFile::load(file, path.clone()).map_err(|error| format!("{}: {error}", path.display()))
}

/// Renders one scanned character as `[line:column]: value`.
#[must_use]
pub fn render_character(character: &Character) -> String {
    let value = if character.is_eof() {
        "<eof>".to_owned()
    } else {
        character.value.escape_ascii().to_string()
    };

    format!("[{}]: {value}", character.position)
}

/// Renders one token as `[line:column] kind "text"`.
///
/// Bytes that are not valid UTF-8 are printed as escapes.
#[must_use]
pub fn render_token(token: &Token, source_file: &SourceFile) -> String {
    let text = source_file
        .content()
        .and_then(|content| token.fragment(content))
        .map_or_else(
            || {
                token
                    .bytes(source_file.as_bytes())
                    .map_or_else(String::new, |bytes| bytes.escape_ascii().to_string())
            },
            |text| format!("{text:?}"),
        );

    format!("[{}] {} {text}", token.position, token.kind)
}

/// Keeps the tokens of the given kind, or every token if no kind is given.
pub fn select_tokens(tokens: &[Token], only: Option<TokenKind>) -> impl Iterator<Item = &Token> {
    tokens
        .iter()
        .filter(move |token| only.map_or(true, |kind| kind == token.kind))
}

/// Marks a run that printed at least one error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Failed;

fn report(error: impl Display) -> Failed {
    eprintln!("{}", Message::new(Severity::Error, error));
    Failed
}

fn dump_characters(source_file: &Arc<SourceFile>, output: &mut dyn Write) -> std::io::Result<()> {
    let mut scanner = Scanner::new(source_file);

    while scanner.running() {
        writeln!(output, "{}", render_character(&scanner.next()))?;
    }

    Ok(())
}

/// Runs the program with the given arguments, writing the dump to `output` and every error to
/// the standard error stream.
///
/// # Errors
/// Returns [`Failed`] if the source could not be loaded, the dump could not be written, or the
/// tokenizer reported anything.
pub fn drive(argument: &Argument, output: &mut dyn Write) -> Result<(), Failed> {
    let source_file = load(argument).map_err(report)?;

    if argument.dump_characters {
        return dump_characters(&source_file, output).map_err(report);
    }

    let printer = Printer::new();
    let token_stream =
        TokenStream::tokenize(&source_file, argument.options(), &printer).map_err(report)?;

    for token in select_tokens(&token_stream, argument.only) {
        writeln!(output, "{}", render_token(token, &source_file)).map_err(report)?;
    }

    if printer.has_printed() {
        Err(Failed)
    } else {
        Ok(())
    }
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: Argument) -> ExitCode {
    match drive(&argument, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failed) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests;
