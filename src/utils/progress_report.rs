//! Progress reporting for a collection build.
//!
//! The builder invokes a caller-supplied callback with the cumulative
//! number of processed bytes and the total byte count established during
//! scanning. Callbacks run on worker threads and may interleave; there is
//! no ordering guarantee between invocations and no guarantee of a final
//! call at `processed == total`.
//!
//! # Examples
//!
//! ```
//! use inpxbase::utils::progress_report::ProgressFn;
//!
//! let reporter: ProgressFn = Box::new(|processed, total| {
//!     println!("Progress: {}/{} bytes", processed, total);
//! });
//! reporter(512, 2048);
//! ```

/// Progress callback: `(processed_bytes, total_bytes)`.
///
/// Must be `Send + Sync`; workers call it concurrently. The processed
/// value is an eventually consistent snapshot that never decreases over
/// the course of a build.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send + Sync>;
