use std::io::Write;

use tempfile::NamedTempFile;
use vuur_base::source_file::SourceFile;
use vuur_lexical::{
    character::{Character, Position},
    token::{Token, TokenKind},
    tokenizer::Unrecognized,
};

use super::{
    drive, render_character, render_token, select_tokens, Argument, Failed, Parser,
    UnrecognizedArgument,
};

fn source_on_disk(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("vuur")
        .suffix(".vu")
        .tempfile()
        .unwrap();
    file.write_all(bytes).unwrap();
    file
}

/// Drives the program over the given file and returns its result with the printed lines.
fn drive_file(file: &NamedTempFile, flags: &[&str]) -> (Result<(), Failed>, Vec<String>) {
    let mut argument = Argument::parse_from(std::iter::once("vuur").chain(flags.iter().copied()));
    argument.file = Some(file.path().to_owned());

    let mut output = Vec::new();
    let result = drive(&argument, &mut output);
    let lines = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect();

    (result, lines)
}

#[test]
fn default_arguments() {
    let argument = Argument::parse_from(["vuur"]);

    assert_eq!(argument.file, None);
    assert!(!argument.dump_characters);
    assert_eq!(argument.unrecognized, UnrecognizedArgument::Report);
    assert_eq!(argument.options(), vuur_lexical::tokenizer::Options::default());
}

#[test]
fn arguments_map_onto_options() {
    let argument = Argument::parse_from([
        "vuur",
        "main.vu",
        "--numeric-literals",
        "--unrecognized",
        "pass-through",
        "--keyword",
        "end",
        "--keyword",
        "return",
        "--only",
        "keyword",
    ]);

    let options = argument.options();
    assert!(options.numeric_literals());
    assert!(!options.operators());
    assert_eq!(options.unrecognized(), Unrecognized::PassThrough);
    assert!(options.reserved_words().contains("procedure"));
    assert!(options.reserved_words().contains("end"));
    assert!(options.reserved_words().contains("return"));
    assert_eq!(argument.only, Some(TokenKind::Keyword));
}

#[test]
fn characters_render_with_their_position() {
    let newline = Character::scanned(b'\n', Position::new(7, 0, 7));
    assert_eq!(render_character(&newline), "[0:7]: \\n");

    let letter = Character::scanned(b't', Position::new(9, 1, 1));
    assert_eq!(render_character(&letter), "[1:1]: t");

    let eof = Character::eof(Position::new(14, 1, 6));
    assert_eq!(render_character(&eof), "[1:6]: <eof>");
}

#[test]
fn tokens_render_with_their_text() {
    let source_file = SourceFile::in_memory("test.vu", "(foo)\n");

    let identifier = Token::new(TokenKind::Identifier, Position::new(1, 0, 1), 3);
    assert_eq!(
        render_token(&identifier, &source_file),
        "[0:1] identifier \"foo\""
    );

    let line_break = Token::new(TokenKind::LineBreak, Position::new(5, 0, 5), 1);
    assert_eq!(
        render_token(&line_break, &source_file),
        "[0:5] line break \"\\n\""
    );
}

#[test]
fn clean_source_succeeds() {
    let file = source_on_disk(b"procedure main (x)\n");
    let (result, lines) = drive_file(&file, &[]);

    assert_eq!(result, Ok(()));
    assert_eq!(lines, [
        "[0:0] keyword \"procedure\"",
        "[0:10] identifier \"main\"",
        "[0:15] ( \"(\"",
        "[0:16] identifier \"x\"",
        "[0:17] ) \")\"",
        "[0:18] line break \"\\n\"",
    ]);
}

#[test]
fn reported_characters_fail_the_run() {
    let file = source_on_disk(b"a $ b");
    let (result, lines) = drive_file(&file, &[]);

    assert_eq!(result, Err(Failed));
    assert_eq!(lines, ["[0:0] identifier \"a\"", "[0:4] identifier \"b\""]);

    let (result, _) = drive_file(&file, &["--unrecognized", "skip"]);
    assert_eq!(result, Ok(()));
}

#[test]
fn missing_file_fails_the_run() {
    let directory = tempfile::tempdir().unwrap();
    let argument = Argument {
        file: Some(directory.path().join("missing.vu")),
        ..Argument::parse_from(["vuur"])
    };

    let mut output = Vec::new();
    assert_eq!(drive(&argument, &mut output), Err(Failed));
    assert!(output.is_empty());
}

#[test]
fn only_prints_the_selected_kind() {
    let file = source_on_disk(b"procedure main (x)\nprocedure");
    let (result, lines) = drive_file(&file, &["--only", "keyword"]);

    assert_eq!(result, Ok(()));
    assert_eq!(lines, ["[0:0] keyword \"procedure\"", "[1:0] keyword \"procedure\""]);
}

#[test]
fn select_tokens_filters_by_kind() {
    let tokens = [
        Token::new(TokenKind::Keyword, Position::new(0, 0, 0), 9),
        Token::new(TokenKind::Identifier, Position::new(10, 0, 10), 4),
        Token::new(TokenKind::OpenBracket, Position::new(15, 0, 15), 1),
    ];

    assert_eq!(select_tokens(&tokens, None).count(), 3);

    let identifiers: Vec<&Token> = select_tokens(&tokens, Some(TokenKind::Identifier)).collect();
    assert_eq!(identifiers, [&tokens[1]]);

    assert_eq!(select_tokens(&tokens, Some(TokenKind::NumLiteral)).count(), 0);
}

#[test]
fn character_dump_of_the_demo_source() {
    let argument = Argument::parse_from(["vuur", "--dump-characters"]);

    let mut output = Vec::new();
    assert_eq!(drive(&argument, &mut output), Ok(()));

    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[0], "[0:0]: o");
    assert_eq!(lines[7], "[0:7]: \\n");
    assert_eq!(lines[14], "[1:6]: <eof>");
}

#[test]
fn latin_1_file_is_tokenized() {
    let file = source_on_disk(b"caf\xe9 (x)\n");
    let (result, lines) = drive_file(&file, &["--unrecognized", "pass-through"]);

    assert_eq!(result, Ok(()));
    assert_eq!(lines[0], "[0:0] identifier \"caf\"");
    assert_eq!(lines[1], "[0:3] unknown \\xe9");
    assert_eq!(lines.len(), 6);
}
