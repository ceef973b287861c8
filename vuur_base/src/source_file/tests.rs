use std::{io::Write, sync::Arc};

use super::{Location, SourceFile, Span};

#[test]
fn test_get_line_byte_positions() {
    let text = b"Hello\nworld\r\n!\rtes";
    let byte_positions = super::get_line_byte_positions(text);
    assert_eq!(byte_positions, vec![0..6, 6..13, 13..18]);
}

#[test]
fn test_mapped_file() {
    const TEST_FILE: &str = "procedure main()\n";
    let source_file = SourceFile::temp(TEST_FILE).unwrap();
    assert_eq!(source_file.content(), Some(TEST_FILE));
    assert_eq!(source_file.len(), TEST_FILE.len());
}

#[test]
fn test_empty_mapped_file() {
    let source_file = SourceFile::temp("").unwrap();
    assert!(source_file.is_empty());
    assert_eq!(source_file.line_number(), 1);
}

#[test]
fn test_get_line() {
    let source_file = SourceFile::in_memory("lines.vu", "one two\n three");
    assert_eq!(source_file.get_line(0), None);
    assert_eq!(source_file.get_line(1).as_deref(), Some("one two\n"));
    assert_eq!(source_file.get_line(2).as_deref(), Some(" three"));
    assert_eq!(source_file.get_line(3), None);
}

#[test]
fn test_get_location() {
    let source_file = SourceFile::in_memory("lines.vu", "one two\n three");

    assert_eq!(
        source_file.get_location(0),
        Some(Location { line: 1, column: 1 })
    );
    assert_eq!(
        source_file.get_location(7),
        Some(Location { line: 1, column: 8 })
    );
    assert_eq!(
        source_file.get_location(9),
        Some(Location { line: 2, column: 2 })
    );
    assert_eq!(source_file.get_location(source_file.len()), None);
}

#[test]
fn test_span_str() {
    let source_file = SourceFile::in_memory("span.vu", "(foo)\n");

    let open = Span::new(source_file.clone(), 0, 1).unwrap();
    let word = Span::new(source_file.clone(), 1, 4).unwrap();

    assert_eq!(open.str(), "(");
    assert_eq!(word.str(), "foo");
    assert_eq!(word.bytes(), b"foo");
    assert!(Span::new(source_file.clone(), 3, 2).is_none());
    assert!(Span::new(source_file.clone(), 0, 7).is_none());
    assert_eq!(Span::to_end(source_file, 1).unwrap().str(), "foo)\n");
}

#[test]
fn test_span_covering_multi_byte_character() {
    let source_file = SourceFile::in_memory("utf8.vu", "aé b");

    // `é` occupies bytes 1 and 2
    let span = Span::covering(Arc::clone(&source_file), 2).unwrap();
    assert_eq!(span.start(), 1);
    assert_eq!(span.end(), 3);
    assert_eq!(span.str(), "é");

    assert!(Span::covering(source_file, 5).is_none());
}

#[test]
fn test_mapped_latin_1_file() {
    let mut tempfile = tempfile::Builder::new()
        .prefix("vuur")
        .suffix(".vu")
        .tempfile()
        .unwrap();
    tempfile.write_all(b"caf\xe9 (x)\n").unwrap();
    let path = tempfile.path().to_owned();

    let source_file = SourceFile::load(tempfile.into_file(), path).unwrap();

    assert_eq!(source_file.content(), None);
    assert_eq!(source_file.as_bytes(), b"caf\xe9 (x)\n");
    assert_eq!(source_file.line_number(), 2);
    assert_eq!(source_file.get_line(1).as_deref(), Some("café (x)\n"));
}

#[test]
fn test_byte_source_treats_each_byte_as_a_character() {
    let source_file = SourceFile::from_bytes("latin1.vu", b"\xe9\xe8 a\nb".to_vec());

    assert!(source_file.content().is_none());
    assert!(source_file.is_boundary(1));
    assert_eq!(
        source_file.get_location(3),
        Some(Location { line: 1, column: 4 })
    );
    assert_eq!(
        source_file.get_location(5),
        Some(Location { line: 2, column: 1 })
    );

    let span = Span::covering(Arc::clone(&source_file), 1).unwrap();
    assert_eq!((span.start(), span.end()), (1, 2));
    assert_eq!(span.bytes(), b"\xe8");
    assert_eq!(span.str(), "è");
}

#[test]
fn test_valid_utf8_bytes_stay_text() {
    let source_file = SourceFile::from_bytes("utf8.vu", "aé".as_bytes().to_vec());

    assert_eq!(source_file.content(), Some("aé"));
    assert!(!source_file.is_boundary(2));
    assert_eq!(source_file.char_indices(0..3), Some(vec![(0, 'a'), (1, 'é')]));
    assert_eq!(source_file.char_indices(0..2), None);
}
