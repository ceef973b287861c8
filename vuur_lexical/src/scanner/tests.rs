use proptest::{prop_assert, prop_assert_eq, proptest};
use vuur_base::source_file::SourceFile;
use vuur_test::source::ascii_source;

use super::{Scanner, ScannerState};
use crate::character::{Character, CharacterKind, Position};

/// Drains the scanner up to and including the end-of-input sentinel.
fn scan_all(scanner: &mut Scanner) -> Vec<Character> {
    let mut characters = Vec::new();

    while scanner.running() {
        characters.push(scanner.next());
    }

    characters
}

#[test]
fn line_and_column_bookkeeping() {
    let source_file = SourceFile::in_memory("demo.vu", "one two\n three");
    let mut scanner = Scanner::new(&source_file);

    let characters = scan_all(&mut scanner);
    let (eof, characters) = characters.split_last().unwrap();

    let expected = [
        (b'o', 0, 0),
        (b'n', 0, 1),
        (b'e', 0, 2),
        (b' ', 0, 3),
        (b't', 0, 4),
        (b'w', 0, 5),
        (b'o', 0, 6),
        (b'\n', 0, 7),
        (b' ', 1, 0),
        (b't', 1, 1),
        (b'h', 1, 2),
        (b'r', 1, 3),
        (b'e', 1, 4),
        (b'e', 1, 5),
    ];

    let actual: Vec<_> = characters
        .iter()
        .map(|character| {
            (
                character.value,
                character.position.line,
                character.position.column,
            )
        })
        .collect();
    assert_eq!(actual, expected);

    assert_eq!(eof.kind, CharacterKind::Eof);
    assert_eq!(eof.value, Character::EOF_VALUE);
    assert_eq!(eof.position, Position::new(14, 1, 6));
}

#[test]
fn whitespace_classification() {
    let source_file = SourceFile::in_memory("ws.vu", " \t\r\nx_(");
    let mut scanner = Scanner::new(&source_file);

    let kinds: Vec<_> = scan_all(&mut scanner)
        .into_iter()
        .map(|character| character.kind)
        .collect();

    assert_eq!(kinds, [
        CharacterKind::Whitespace,
        CharacterKind::Whitespace,
        CharacterKind::Whitespace,
        CharacterKind::Whitespace,
        CharacterKind::Char,
        CharacterKind::Char,
        CharacterKind::Char,
        CharacterKind::Eof,
    ]);
}

#[test]
fn carriage_return_does_not_end_a_line() {
    let source_file = SourceFile::in_memory("crlf.vu", "a\r\nb");
    let mut scanner = Scanner::new(&source_file);

    let positions: Vec<_> = scan_all(&mut scanner)
        .into_iter()
        .map(|character| (character.position.line, character.position.column))
        .collect();

    assert_eq!(positions, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)]);
}

#[test]
fn empty_source_yields_eof_immediately() {
    let source_file = SourceFile::in_memory("empty.vu", "");
    let mut scanner = Scanner::new(&source_file);

    assert!(scanner.running());
    assert_eq!(scanner.state(), ScannerState::Running);

    let eof = scanner.next();
    assert!(eof.is_eof());
    assert_eq!(eof.position, Position::new(0, 0, 0));
    assert!(!scanner.running());
    assert_eq!(scanner.state(), ScannerState::Exhausted);
}

#[test]
fn eof_after_trailing_newline_starts_a_new_line() {
    let source_file = SourceFile::in_memory("newline.vu", "ab\n");
    let mut scanner = Scanner::new(&source_file);

    let eof = *scan_all(&mut scanner).last().unwrap();
    assert_eq!(eof.position, Position::new(3, 1, 0));
}

proptest! {
    #[test]
    fn idempotent_eof(source in ascii_source(), extra_calls in 1usize..8) {
        let source_file = SourceFile::in_memory("prop.vu", source);
        let mut scanner = Scanner::new(&source_file);

        let eof = *scan_all(&mut scanner).last().unwrap();
        prop_assert!(eof.is_eof());

        for _ in 0..extra_calls {
            prop_assert_eq!(scanner.next(), eof);
            prop_assert!(!scanner.running());
        }
    }

    #[test]
    fn monotonic_cursor(source in ascii_source()) {
        let source_file = SourceFile::in_memory("prop.vu", source.clone());
        let mut scanner = Scanner::new(&source_file);

        let characters = scan_all(&mut scanner);
        prop_assert_eq!(characters.len(), source.len() + 1);

        for (index, character) in characters.iter().enumerate() {
            prop_assert_eq!(character.position.offset, index);
        }
    }

    #[test]
    fn positions_agree_with_source_locations(source in ascii_source()) {
        let source_file = SourceFile::in_memory("prop.vu", source);
        let mut scanner = Scanner::new(&source_file);

        for character in scan_all(&mut scanner) {
            if character.is_eof() {
                break;
            }

            let location = source_file.get_location(character.position.offset).unwrap();
            prop_assert_eq!(location.line, character.position.line + 1);
            prop_assert_eq!(location.column, character.position.column + 1);
            prop_assert_eq!(character.value, source_file.as_bytes()[character.position.offset]);
        }
    }
}
