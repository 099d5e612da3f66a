//! MIME type detection.
//!
//! Detection combines two independent signals: the filename extension and,
//! when that is unknown, a short prefix of the file's bytes matched against a
//! table of magic-number signatures. Only the leading bytes needed by the
//! longest signature are ever read.

// Submodule declarations
pub mod config;
pub mod detector;
pub mod extension;
pub mod matcher;
pub mod prefix;
pub mod signature;
pub mod types;

use std::io::{Read, Seek};
use std::path::Path;

use once_cell::sync::Lazy;

// Re-exports
pub use config::DetectOptions;
pub use detector::{Detector, file_extension};
pub use extension::{BUILTIN_EXTENSIONS, ExtensionTable};
pub use matcher::{SignatureMatcher, encode_prefix};
pub use prefix::{Prefix, PrefixReader};
pub use signature::{BUILTIN_SIGNATURES, SignatureTable};
pub use types::{
    DEFAULT_MIME_TYPE, Detection, MAX_PATTERN_SPAN, MatchSource, Segment, SignatureEntry,
};

static DEFAULT_DETECTOR: Lazy<Detector> = Lazy::new(Detector::new);

/// Build and validate the built-in tables now instead of on first use.
///
/// # Panics
///
/// Panics if a built-in signature entry is malformed.
pub fn init() {
    Lazy::force(&BUILTIN_EXTENSIONS);
    Lazy::force(&BUILTIN_SIGNATURES);
}

/// Detect the MIME type of the file at `path` with default options.
///
/// The extension is tried first without touching the filesystem. Only when it
/// is missing or unknown is the file opened and its leading bytes compared
/// against the signature table.
///
/// # Arguments
///
/// * `path` - Path to the file to analyze; it need not exist
///
/// # Returns
///
/// * The detected MIME type, or [`DEFAULT_MIME_TYPE`] when nothing matches or
///   the file cannot be read
///
/// # Examples
///
/// ```rust
/// assert_eq!(mimesniff::detect("readme.txt"), "text/plain");
/// ```
pub fn detect<P: AsRef<Path>>(path: P) -> &'static str {
    DEFAULT_DETECTOR.detect(path)
}

/// Detect the MIME type of an open handle from its leading bytes.
///
/// The extension phase is skipped. The handle is rewound to offset 0 before
/// and after the read, so it can be reused by the caller.
///
/// # Arguments
///
/// * `reader` - A reader that can read and seek
///
/// # Returns
///
/// * The MIME type of the first matching signature, or [`DEFAULT_MIME_TYPE`]
///   when none matches or the handle cannot be read
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let mut cursor = Cursor::new(b"%PDF-1.7\n".to_vec());
/// assert_eq!(mimesniff::detect_from_reader(&mut cursor), "application/pdf");
/// assert_eq!(cursor.position(), 0);
/// ```
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> &'static str {
    DEFAULT_DETECTOR.detect_from_reader(reader)
}

/// Detect the MIME type of an in-memory buffer from its leading bytes.
///
/// # Examples
///
/// ```rust
/// let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
/// assert_eq!(mimesniff::detect_from_bytes(png), "image/png");
/// ```
pub fn detect_from_bytes(bytes: &[u8]) -> &'static str {
    DEFAULT_DETECTOR.detect_from_bytes(bytes)
}

/// Detect with provenance, using default options.
///
/// # Arguments
///
/// * `path` - Path to the file to analyze; it need not exist
///
/// # Returns
///
/// * A [`Detection`] holding the MIME type and the [`MatchSource`] phase
///   that produced it
///
/// # Examples
///
/// ```rust
/// use mimesniff::MatchSource;
///
/// let detection = mimesniff::classify("missing.unknownext");
/// assert_eq!(detection.source, MatchSource::Fallback);
/// assert!(detection.is_fallback());
/// ```
pub fn classify<P: AsRef<Path>>(path: P) -> Detection {
    DEFAULT_DETECTOR.classify(path)
}

/// Whether `mime` belongs to the built-in vocabulary.
pub fn is_known_mime(mime: &str) -> bool {
    DEFAULT_DETECTOR.is_known_mime(mime)
}
