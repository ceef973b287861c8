//! Contains the immutable source buffer that the scanner walks over.

use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt::{Debug, Display},
    fs::File,
    ops::Range,
    path::PathBuf,
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Represents a source buffer fed to the lexical phase.
///
/// The content is a sequence of bytes that never changes after construction. Every [`Span`] and
/// token offset is a byte index into [`SourceFile::as_bytes`]. Content that is valid UTF-8 is
/// displayed as UTF-8; any other content is displayed as Latin-1, one character per byte.
#[derive(Getters)]
pub struct SourceFile {
    content: Content,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,

    lines: Vec<Range<usize>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("len", &self.len())
            .field("lines", &self.lines)
            .finish()
    }
}

enum Content {
    Mapped(MappedSource),
    Text(String),
    Bytes(Vec<u8>),
}

impl Content {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(error) => Self::Bytes(error.into_bytes()),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Mapped(mapped) => mapped.as_bytes(),
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            Self::Mapped(mapped) => *mapped.borrow_mapped_str(),
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }
}

#[self_referencing]
struct MappedSource {
    file: File,
    mapped: Option<memmap::Mmap>,

    #[borrows(mapped)]
    #[covariant]
    mapped_str: Option<&'this str>,
}

impl MappedSource {
    fn create(file: File) -> Result<Self, Error> {
        // mapping a zero-length file fails on most platforms
        let mapped = if file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        Ok(MappedSourceBuilder {
            file,
            mapped,
            mapped_str_builder: |mapped| {
                mapped
                    .as_deref()
                    .map_or(Some(""), |bytes| std::str::from_utf8(bytes).ok())
            },
        }
        .build())
    }

    fn as_bytes(&self) -> &[u8] { self.borrow_mapped().as_deref().unwrap_or_default() }
}

impl SourceFile {
    fn new(full_path: PathBuf, content: Content) -> Arc<Self> {
        let lines = get_line_byte_positions(content.as_bytes());
        Arc::new(Self {
            content,
            full_path,
            lines,
        })
    }

    /// Gets the content of the source file as text.
    ///
    /// Returns [`None`] if the content is not valid UTF-8.
    #[must_use]
    pub fn content(&self) -> Option<&str> { self.content.as_str() }

    /// Gets the raw bytes of the source file. The scanner reads one byte per character.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { self.content.as_bytes() }

    /// Gets the length of the source file in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.as_bytes().len() }

    /// Checks whether the source file has no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.as_bytes().is_empty() }

    /// Checks whether the given byte index starts a character (or is the end of the file).
    #[must_use]
    pub fn is_boundary(&self, byte_index: ByteIndex) -> bool {
        match self.content() {
            Some(text) => text.is_char_boundary(byte_index),
            None => byte_index <= self.len(),
        }
    }

    /// Decodes the characters in the given byte range, each paired with its byte index.
    ///
    /// Returns [`None`] if the range is out of bounds or does not fall on character boundaries.
    #[must_use]
    pub fn char_indices(&self, range: Range<ByteIndex>) -> Option<Vec<(ByteIndex, char)>> {
        let start = range.start;

        match self.content() {
            Some(text) => Some(
                text.get(range)?
                    .char_indices()
                    .map(|(offset, char)| (start + offset, char))
                    .collect(),
            ),
            None => Some(
                self.as_bytes()
                    .get(range)?
                    .iter()
                    .enumerate()
                    .map(|(offset, byte)| (start + offset, char::from(*byte)))
                    .collect(),
            ),
        }
    }

    /// Gets the text of the given byte range, decoded the way [`SourceFile`] displays it.
    #[must_use]
    pub fn text(&self, range: Range<ByteIndex>) -> Option<Cow<'_, str>> {
        match self.content() {
            Some(text) => text.get(range).map(Cow::Borrowed),
            None => self
                .as_bytes()
                .get(range)
                .map(|bytes| Cow::Owned(bytes.iter().copied().map(char::from).collect())),
        }
    }

    /// Gets the line of the source file at the given line number.
    ///
    /// The line number starts at 1. The returned line includes its terminating `\n`, if any.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<Cow<'_, str>> {
        self.line_range(line).and_then(|range| self.text(range))
    }

    /// Gets the byte range of the line at the given line number (starts at 1).
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<ByteIndex>> {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .cloned()
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_number(&self) -> usize { self.lines.len() }

    /// Loads the source file from the given file path.
    ///
    /// Any byte content is accepted; content that is not valid UTF-8 is kept as raw bytes.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when mapping the file to memory.
    pub fn load(file: File, path: PathBuf) -> Result<Arc<Self>, Error> {
        let source = MappedSource::create(file)?;
        Ok(Self::new(path, Content::Mapped(source)))
    }

    /// Wraps the given text into a source file without touching the file system.
    #[must_use]
    pub fn in_memory(path: impl Into<PathBuf>, text: impl Into<String>) -> Arc<Self> {
        Self::new(path.into(), Content::Text(text.into()))
    }

    /// Wraps the given bytes into a source file without touching the file system.
    #[must_use]
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Arc<Self> {
        Self::new(path.into(), Content::from_bytes(bytes.into()))
    }

    /// Creates a temporary source file and writes the given displayable object to it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("vuur")
            .suffix(".vu")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        let path = tempfile.path().to_owned();

        Self::load(tempfile.into_file(), path)
    }

    /// Gets the human readable [`Location`] of the given byte index.
    ///
    /// Returns [`None`] if the index is not on a character boundary or lies past the last
    /// character.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.is_boundary(byte_index) {
            return None;
        }

        let line = self
            .lines
            .binary_search_by(|range| {
                if range.contains(&byte_index) {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()?;

        let line_start = self.lines[line].start;

        // columns count characters, not bytes
        let column = self.char_indices(line_start..byte_index)?.len() + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Represents a range of characters in a source file.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the start byte index of the span.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: ByteIndex,

    /// Gets the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_ptr_value = Arc::as_ptr(&self.source_file) as usize;
        let other_ptr_value = Arc::as_ptr(&other.source_file) as usize;

        self_ptr_value
            .cmp(&other_ptr_value)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.source_file).hash(state);
    }
}

/// Is a struct pointing to a particular location in a source file, meant for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location (starts at 1).
    pub column: usize,
}

impl Span {
    /// Creates a span from the given start and end byte indices in the source file.
    ///
    /// # Parameters
    /// - `start`: The start byte index of the span.
    /// - `end`: The end byte index of the span (exclusive).
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: ByteIndex, end: ByteIndex) -> Option<Self> {
        if start > end
            || end > source_file.len()
            || !source_file.is_boundary(start)
            || !source_file.is_boundary(end)
        {
            return None;
        }

        Some(Self {
            start,
            end,
            source_file,
        })
    }

    /// Creates a span from the given start byte index to the end of the source file.
    #[must_use]
    pub fn to_end(source_file: Arc<SourceFile>, start: ByteIndex) -> Option<Self> {
        let end = source_file.len();
        Self::new(source_file, start, end)
    }

    /// Creates a span over the whole character that contains the given byte.
    ///
    /// The byte does not need to sit on a character boundary, which lets byte-oriented callers
    /// point at multi-byte characters. In a source that is not UTF-8 every byte is a character.
    #[must_use]
    pub fn covering(source_file: Arc<SourceFile>, byte_index: ByteIndex) -> Option<Self> {
        if byte_index >= source_file.len() {
            return None;
        }

        let (start, end) = match source_file.content() {
            Some(content) => {
                let start = (0..=byte_index)
                    .rev()
                    .find(|index| content.is_char_boundary(*index))?;
                let character = content[start..].chars().next()?;

                (start, start + character.len_utf8())
            }
            None => (byte_index, byte_index + 1),
        };

        Self::new(source_file, start, end)
    }

    /// Gets the raw bytes of the source code that the span represents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] { &self.source_file.as_bytes()[self.start..self.end] }

    /// Gets the text of the source code that the span represents.
    #[must_use]
    pub fn str(&self) -> Cow<'_, str> {
        self.source_file
            .text(self.start..self.end)
            .unwrap_or_default()
    }

    /// Gets the starting [`Location`] of the span.
    ///
    /// Returns [`None`] for an empty span at the end of the source file.
    #[must_use]
    pub fn start_location(&self) -> Option<Location> { self.source_file.get_location(self.start) }
}

/// Splits the bytes into line ranges. Only `\n` terminates a line; `\r` is ordinary content.
fn get_line_byte_positions(text: &[u8]) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    let line_breaks = text
        .iter()
        .enumerate()
        .filter_map(|(index, byte)| (*byte == b'\n').then_some(index));

    for byte in line_breaks {
        #[allow(clippy::range_plus_one)]
        results.push(current_position..byte + 1);

        current_position = byte + 1;
    }

    results.push(current_position..text.len());

    results
}

#[cfg(test)]
mod tests;
