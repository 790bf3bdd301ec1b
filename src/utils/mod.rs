// Utility functions and helpers
//
// This module provides general-purpose helpers for I/O operations and
// progress reporting used across the import pipeline.

pub mod io_utils;
pub mod progress_report;

pub use io_utils::{bytes_from_file, find_file_by_stem};
pub use progress_report::ProgressFn;
