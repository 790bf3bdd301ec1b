//! Parser for INPX index-descriptor (`.inp`) files.
//!
//! An index descriptor is a legacy positional text format: one record per
//! book, records separated by CR LF, fields within a record separated by
//! the single byte `0x04`. Up to eleven positional fields are recognized:
//!
//! 1. author list
//! 2. genre list
//! 3. title
//! 4. series name
//! 5. series index (appended to the series name)
//! 6. path base name
//! 7.–9. unused
//! 10. extension (appended to the path base name)
//! 11. date
//!
//! The author and genre fields go through a normalization pass inherited
//! from the format's original consumer. The rules are a compatibility
//! surface and are preserved exactly, including the quirk that the genre
//! field keeps leading/trailing whitespace where the author field does not.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::collection::BookRecord;

/// Record separator inside an index descriptor.
const RECORD_SEP: &[u8] = b"\r\n";
/// Field separator inside a record.
const FIELD_SEP: u8 = 0x04;

/// Parses the raw bytes of one decompressed index descriptor.
///
/// Records are split on CR LF; trailing bytes with no terminator are
/// discarded. Parsing checks the `cancel` flag between records and stops
/// early once it is set, returning the records parsed so far.
///
/// A record yields a [`BookRecord`] only if it contains at least one
/// field terminated by `0x04`; anything else is skipped.
pub fn parse_descriptor(data: &[u8], cancel: &AtomicBool) -> Vec<BookRecord> {
    let mut books = Vec::new();
    let mut rest = data;
    while !cancel.load(Ordering::Relaxed) {
        let Some(pos) = find_subslice(rest, RECORD_SEP) else {
            break;
        };
        if let Some(book) = parse_record(&rest[..pos]) {
            books.push(book);
        }
        rest = &rest[pos + RECORD_SEP.len()..];
    }
    books
}

/// Parses one CRLF-delimited record into a [`BookRecord`].
///
/// Returns `None` when the record contains no `0x04`-terminated field.
pub fn parse_record(record: &[u8]) -> Option<BookRecord> {
    let segments: Vec<&[u8]> = record.split(|b| *b == FIELD_SEP).collect();
    // Only segments followed by a separator count as fields; the tail
    // after the last 0x04 is not a field.
    let field_count = segments.len() - 1;
    if field_count == 0 {
        return None;
    }

    let mut book = BookRecord::default();
    for (i, segment) in segments[..field_count].iter().enumerate() {
        let text = String::from_utf8_lossy(segment);
        match i + 1 {
            1 => book.author = normalize_name_list(&text, true),
            2 => book.genre = normalize_name_list(&text, false),
            3 => book.title = text.into_owned(),
            4 => book.series = text.into_owned(),
            5 => {
                if !text.is_empty() {
                    book.series.push(' ');
                    book.series.push_str(&text);
                }
            },
            6 => book.path = text.into_owned(),
            10 => {
                if !text.is_empty() {
                    book.path.push('.');
                    book.path.push_str(&text);
                }
            },
            11 => book.date = text.into_owned(),
            _ => {},
        }
    }
    Some(book)
}

/// Normalizes an author or genre list field.
///
/// The transform, in order:
/// 1. strip every character in the control/space range (0–32);
/// 2. drop one trailing ':';
/// 3. replace ',' with ' ' and ':' with ", ";
/// 4. collapse every " ," sequence into ",";
/// 5. trim leading and trailing control/space characters — author only
///    (`trim_edges`); the genre field skips this step.
fn normalize_name_list(raw: &str, trim_edges: bool) -> String {
    let stripped: String = raw.chars().filter(|c| (*c as u32) > 32).collect();
    let stripped = match stripped.strip_suffix(':') {
        Some(s) => s.to_string(),
        None => stripped,
    };

    let mut value = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        match c {
            ',' => value.push(' '),
            ':' => value.push_str(", "),
            _ => value.push(c),
        }
    }

    while let Some(n) = value.find(" ,") {
        value.remove(n);
    }

    if trim_edges {
        value.trim_matches(|c: char| (c as u32) <= 32).to_string()
    } else {
        value
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
