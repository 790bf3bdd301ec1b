//! Collection database storage
//!
//! The on-disk "base" file is a whole-file, length-prefixed binary layout,
//! little-endian throughout. [`base_writer`] encodes and persists it,
//! [`base_reader`] decodes it back; the two are exact mirrors.

pub mod base_reader;
pub mod base_writer;

pub use base_reader::{decode_base, read_base};
pub use base_writer::{encode_base, write_base};
