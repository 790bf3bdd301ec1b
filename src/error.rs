//! Error types and result type for the inpxbase crate.
//!
//! This module defines all error variants that can occur when importing an
//! INPX catalog and writing a collection database. It uses the `snafu`
//! library for ergonomic error handling with automatic backtrace capture.
//!
//! # Examples
//!
//! ```
//! use inpxbase::{Result, BaseError};
//!
//! fn open_catalog() -> Result<String> {
//!     // Return an error
//!     Err(BaseError::invalid_parameter("Catalog path cannot be empty"))
//! }
//!
//! fn handle_error() {
//!     match open_catalog() {
//!         Ok(data) => println!("Success: {}", data),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Variants
//!
//! - [`BaseError::Io`]: I/O errors from file operations
//! - [`BaseError::ArchiveError`]: Catalog container (zip) access failures
//! - [`BaseError::InvalidDataFormat`]: Malformed catalog or database data
//! - [`BaseError::InvalidParameter`]: Invalid function parameters
//! - [`BaseError::EntryNotFound`]: Catalog entry lookup failures
//! - [`BaseError::UserInterrupted`]: Cooperative cancellation observed

use std::io;

use snafu::{Backtrace, Snafu};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the inpxbase crate.
///
/// All errors include automatic backtrace capture for debugging purposes.
/// Use the helper methods on `BaseError` for convenient error construction.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BaseError {
    /// I/O error occurred during file operations.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Catalog container could not be opened or read.
    #[snafu(display("Archive error: {source}"))]
    ArchiveError {
        source: zip::result::ZipError,
        backtrace: Backtrace,
    },

    /// Catalog entry was not found inside the container.
    #[snafu(display("Entry not found: {name}"))]
    EntryNotFound {
        name: String,
        backtrace: Backtrace,
    },

    /// Catalog or database data is malformed or doesn't match the expected format.
    #[snafu(display("Invalid data format: {message}"))]
    InvalidDataFormat {
        message: String,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// Operation was interrupted by user.
    #[snafu(display("User interrupted"))]
    UserInterrupted {
        backtrace: Backtrace,
    },

    /// General error that doesn't fit other categories.
    #[snafu(display("General error: {message}"))]
    GeneralError {
        message: String,
        backtrace: Backtrace,
    },
}

// For automatic conversions from standard error types
impl From<io::Error> for BaseError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<zip::result::ZipError> for BaseError {
    fn from(source: zip::result::ZipError) -> Self {
        Self::ArchiveError { source, backtrace: Backtrace::capture() }
    }
}

impl From<std::string::FromUtf8Error> for BaseError {
    fn from(source: std::string::FromUtf8Error) -> Self {
        Self::InvalidDataFormat {
            message: format!("Invalid UTF-8 (String): {}", source),
            backtrace: Backtrace::capture(),
        }
    }
}

impl From<std::str::Utf8Error> for BaseError {
    fn from(source: std::str::Utf8Error) -> Self {
        Self::InvalidDataFormat {
            message: format!("Invalid UTF-8 (&str): {}", source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl BaseError {
    /// Creates an `InvalidParameter` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use inpxbase::BaseError;
    ///
    /// let error = BaseError::invalid_parameter("Path cannot be empty");
    /// ```
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidDataFormat` error with the given message.
    pub fn invalid_data_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidDataFormat {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `EntryNotFound` error for the given entry name.
    pub fn entry_not_found<S: Into<String>>(name: S) -> Self {
        Self::EntryNotFound {
            name: name.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error for an invalid path.
    pub fn invalid_path<S: Into<String>>(path: S) -> Self {
        Self::InvalidParameter {
            message: format!("Invalid path: {}", path.into()),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `UserInterrupted` error.
    pub fn user_interrupted() -> Self {
        Self::UserInterrupted {
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `GeneralError` with the given message.
    pub fn general_error<S: Into<String>>(message: S) -> Self {
        Self::GeneralError {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is a `UserInterrupted` variant.
    pub fn is_user_interrupted(&self) -> bool {
        matches!(self, BaseError::UserInterrupted { .. })
    }
}

/// A specialized `Result` type for inpxbase operations.
///
/// This is a convenience type alias that uses [`BaseError`] as the error type.
pub type Result<T> = std::result::Result<T, BaseError>;
