//! mimesniff - MIME type detection from file extensions and magic numbers
//!
//! This library determines the content type of a file from two signals:
//!
//! - **Extension**: the suffix after the last `.` of the file name, looked up
//!   in a built-in table. No I/O is needed.
//! - **Signature**: when the extension is unknown, the first few bytes of the
//!   file are compared against a table of magic numbers. The more specific
//!   (longer) signature wins when several match.
//!
//! Detection is total: missing, unreadable, and empty files all resolve to
//! `application/octet-stream`.
//!
//! # Example - Detecting from a path
//!
//! ```no_run
//! let mime = mimesniff::detect("photo.jpg");
//! assert_eq!(mime, "image/jpeg");
//!
//! // No extension: the file header decides
//! let mime = mimesniff::detect("downloads/blob");
//! println!("blob is {}", mime);
//! ```
//!
//! # Example - Provenance and options
//!
//! ```rust
//! use mimesniff::{DetectOptions, Detector, MatchSource};
//!
//! let detector = Detector::with_options(
//!     DetectOptions::new().with_sniff_on_extension_miss(false),
//! );
//! let detection = detector.classify("REPORT.PDF");
//! assert_eq!(detection.mime, "application/pdf");
//! assert_eq!(detection.source, MatchSource::Extension);
//! ```

/// Error types
pub mod error;

/// Extension and signature based detection
pub mod detection;

pub use detection::{
    DEFAULT_MIME_TYPE, DetectOptions, Detection, Detector, MAX_PATTERN_SPAN, MatchSource, Segment,
    SignatureEntry, SignatureTable, classify, detect, detect_from_bytes, detect_from_reader, init, is_known_mime,
};
pub use error::{Error, Result};
