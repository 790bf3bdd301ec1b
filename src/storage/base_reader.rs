//! Decoder for the collection database file.
//!
//! Exact mirror of [`crate::storage::base_writer`]: reads the books-root
//! header, then one length-prefixed entry per processed book archive. The
//! host application loads collections through this module; it also backs
//! the codec round-trip tests.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::collection::{BookRecord, Collection, FileRecord};
use crate::{BaseError, Result};

fn get_str16<R: Read>(reader: &mut R) -> Result<String> {
    let len = reader.read_u16::<LittleEndian>()? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn decode_book(payload: &[u8]) -> Result<BookRecord> {
    let mut cursor = payload;
    let book = BookRecord {
        path: get_str16(&mut cursor)?,
        author: get_str16(&mut cursor)?,
        title: get_str16(&mut cursor)?,
        series: get_str16(&mut cursor)?,
        genre: get_str16(&mut cursor)?,
        date: get_str16(&mut cursor)?,
    };
    if !cursor.is_empty() {
        return Err(BaseError::invalid_data_format(
            "Trailing bytes after book record fields",
        ));
    }
    Ok(book)
}

fn decode_file_record(payload: &[u8]) -> Result<FileRecord> {
    let mut cursor = payload;
    let rel_path = get_str16(&mut cursor)?;
    let hash = get_str16(&mut cursor)?;
    let mut books = Vec::new();
    while !cursor.is_empty() {
        let book_len = cursor.read_u64::<LittleEndian>()? as usize;
        if book_len > cursor.len() {
            return Err(BaseError::invalid_data_format(format!(
                "Book record length {} exceeds remaining entry payload {}",
                book_len,
                cursor.len()
            )));
        }
        let (book_payload, rest) = cursor.split_at(book_len);
        books.push(decode_book(book_payload)?);
        cursor = rest;
    }
    Ok(FileRecord { rel_path, hash, books })
}

/// Decodes a complete database byte buffer into a [`Collection`].
pub fn decode_base(data: &[u8]) -> Result<Collection> {
    let mut cursor = data;
    let books_root = PathBuf::from(get_str16(&mut cursor)?);
    let mut files = Vec::new();
    while !cursor.is_empty() {
        let entry_len = cursor.read_u64::<LittleEndian>()? as usize;
        if entry_len > cursor.len() {
            return Err(BaseError::invalid_data_format(format!(
                "Entry length {} exceeds remaining file size {}",
                entry_len,
                cursor.len()
            )));
        }
        let (entry_payload, rest) = cursor.split_at(entry_len);
        files.push(decode_file_record(entry_payload)?);
        cursor = rest;
    }
    Ok(Collection { books_root, files })
}

/// Reads and decodes the database file at `path`.
pub fn read_base(path: &Path) -> Result<Collection> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_base(&data)
}
