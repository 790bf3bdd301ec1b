//! Encoder and writer for the collection database file.
//!
//! Layout, little-endian irrespective of host byte order:
//!
//! ```text
//! u16  books_root_len;  bytes[books_root_len]          // UTF-8, no terminator
//! repeat until end of file:
//!   u64 entry_len                                      // entry payload length
//!   u16 rel_path_len;  bytes rel_path
//!   u16 hash_len;      bytes hash
//!   repeat per book in this entry:
//!     u64 book_len                                     // book payload length
//!     u16 len; bytes path
//!     u16 len; bytes author
//!     u16 len; bytes title
//!     u16 len; bytes series
//!     u16 len; bytes genre
//!     u16 len; bytes date
//! ```
//!
//! Writing is single-shot: the destination file is created or truncated
//! and the whole collection replaces any prior database.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use log::debug;

use crate::collection::{BookRecord, Collection, FileRecord};
use crate::Result;

fn put_str16<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    // Length fields are u16 by format definition; the legacy writer
    // truncates longer values the same way.
    writer.write_u16::<LittleEndian>(value.len() as u16)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn encode_book(book: &BookRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    put_str16(&mut buf, &book.path)?;
    put_str16(&mut buf, &book.author)?;
    put_str16(&mut buf, &book.title)?;
    put_str16(&mut buf, &book.series)?;
    put_str16(&mut buf, &book.genre)?;
    put_str16(&mut buf, &book.date)?;
    Ok(buf)
}

fn encode_file_record(record: &FileRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    put_str16(&mut buf, &record.rel_path)?;
    put_str16(&mut buf, &record.hash)?;
    for book in &record.books {
        let book_buf = encode_book(book)?;
        buf.write_u64::<LittleEndian>(book_buf.len() as u64)?;
        buf.extend_from_slice(&book_buf);
    }
    Ok(buf)
}

fn encode_to<W: Write>(writer: &mut W, collection: &Collection) -> Result<()> {
    put_str16(writer, &collection.books_root.to_string_lossy())?;
    for record in &collection.files {
        let entry = encode_file_record(record)?;
        writer.write_u64::<LittleEndian>(entry.len() as u64)?;
        writer.write_all(&entry)?;
    }
    Ok(())
}

/// Encodes the in-memory collection into the database byte layout.
pub fn encode_base(collection: &Collection) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(&mut out, collection)?;
    Ok(out)
}

/// Encodes the collection and writes it to `path`, creating parent
/// directories as needed and truncating any existing file.
pub fn write_base(path: &Path, collection: &Collection) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    encode_to(&mut writer, collection)?;
    writer.flush()?;
    debug!(
        "wrote collection database: {} file records, {}",
        collection.files.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::ReadBytesExt;

    fn sample_collection() -> Collection {
        Collection {
            books_root: "/books".into(),
            files: vec![FileRecord {
                rel_path: "arch.zip".to_string(),
                hash: "cafe".to_string(),
                books: vec![BookRecord {
                    path: "1.fb2".to_string(),
                    author: "Doe John".to_string(),
                    title: "A Title".to_string(),
                    series: "S 1".to_string(),
                    genre: "sf".to_string(),
                    date: "2020-01-01".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn header_is_length_prefixed_books_root() {
        let data = encode_base(&sample_collection()).unwrap();
        let mut cursor = std::io::Cursor::new(&data);
        let len = cursor.read_u16::<LittleEndian>().unwrap() as usize;
        assert_eq!(len, "/books".len());
        assert_eq!(&data[2..2 + len], b"/books");
    }

    #[test]
    fn entry_length_covers_exact_payload() {
        let data = encode_base(&sample_collection()).unwrap();
        let root_len = "/books".len();
        let mut cursor = std::io::Cursor::new(&data[2 + root_len..]);
        let entry_len = cursor.read_u64::<LittleEndian>().unwrap() as usize;
        assert_eq!(2 + root_len + 8 + entry_len, data.len());
    }

    #[test]
    fn empty_collection_is_just_the_header() {
        let collection = Collection::new("/books");
        let data = encode_base(&collection).unwrap();
        assert_eq!(data.len(), 2 + "/books".len());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Collections").join("test").join("base");
        write_base(&path, &sample_collection()).unwrap();
        assert!(path.is_file());
        assert_eq!(
            std::fs::read(&path).unwrap(),
            encode_base(&sample_collection()).unwrap()
        );
    }
}
