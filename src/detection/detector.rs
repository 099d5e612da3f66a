//! Two-phase MIME type detection.
//!
//! 1. Extension phase: the text after the last `.` of the file name is looked
//!    up in the extension table. No I/O happens here; the file need not exist.
//! 2. Signature phase: on a miss, the first bytes of the file are read and
//!    matched against the signature table.
//!
//! If both phases miss, the result is [`DEFAULT_MIME_TYPE`].

use std::borrow::Cow;
use std::io::{Read, Seek};
use std::path::Path;

use super::config::DetectOptions;
use super::extension::{BUILTIN_EXTENSIONS, ExtensionTable};
use super::matcher::SignatureMatcher;
use super::prefix::PrefixReader;
use super::signature::{BUILTIN_SIGNATURES, SignatureTable};
use super::types::{DEFAULT_MIME_TYPE, Detection, MatchSource};

/// MIME type detector over the built-in tables.
///
/// Cheap to construct and `Copy`; the tables themselves are process-wide and
/// shared by every detector.
///
/// # Examples
///
/// ```rust
/// use mimesniff::Detector;
///
/// let detector = Detector::new();
/// assert_eq!(detector.detect("readme.txt"), "text/plain");
/// assert_eq!(detector.detect("missing.unknownext"), "application/octet-stream");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    options: DetectOptions,
    extensions: &'static ExtensionTable,
    signatures: &'static SignatureTable,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    /// Create a detector with default options.
    pub fn new() -> Self {
        Self::with_options(DetectOptions::default())
    }

    /// Create a detector with custom options.
    pub fn with_options(options: DetectOptions) -> Self {
        Self {
            options,
            extensions: &BUILTIN_EXTENSIONS,
            signatures: &BUILTIN_SIGNATURES,
        }
    }

    /// Options this detector was built with.
    pub fn options(&self) -> &DetectOptions {
        &self.options
    }

    /// Detect the MIME type of the file at `path`. Never fails.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file to analyze; it need not exist
    ///
    /// # Returns
    ///
    /// * The detected MIME type, or [`DEFAULT_MIME_TYPE`] when nothing matches
    pub fn detect<P: AsRef<Path>>(&self, path: P) -> &'static str {
        self.classify(path).mime
    }

    /// Like [`detect`](Self::detect), but also reports which phase produced
    /// the result.
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> Detection {
        let path = path.as_ref();

        if let Some(ext) = file_extension(path) {
            let ext = self.normalize_extension(ext);
            if let Some(mime) = self.extensions.lookup(&ext) {
                tracing::debug!(path = %path.display(), extension = %ext, mime, "matched extension");
                return Detection {
                    mime,
                    source: MatchSource::Extension,
                };
            }
        }

        if !self.options.sniff_on_extension_miss {
            tracing::debug!(path = %path.display(), "unknown extension, sniffing disabled");
            return Detection::FALLBACK;
        }

        let prefix = self.prefix_reader().read_path(path);
        let detection = self.classify_prefix(&prefix);
        tracing::debug!(
            path = %path.display(),
            mime = detection.mime,
            source = ?detection.source,
            "resolved by content"
        );
        detection
    }

    /// Detect from an already open handle, skipping the extension phase.
    ///
    /// The handle is rewound to offset 0 before and after reading. A handle
    /// that cannot be read or rewound resolves to the default type.
    pub fn detect_from_reader<R: Read + Seek>(&self, reader: &mut R) -> &'static str {
        self.classify_reader(reader).mime
    }

    /// Like [`detect_from_reader`](Self::detect_from_reader), with provenance.
    pub fn classify_reader<R: Read + Seek>(&self, reader: &mut R) -> Detection {
        match self.prefix_reader().read_from(reader) {
            Ok(prefix) => self.classify_prefix(&prefix),
            Err(e) => {
                tracing::debug!(error = %e, "cannot read prefix from handle");
                Detection::FALLBACK
            },
        }
    }

    /// Detect from an in-memory buffer. Only the leading bytes are examined.
    pub fn detect_from_bytes(&self, bytes: &[u8]) -> &'static str {
        self.classify_bytes(bytes).mime
    }

    /// Like [`detect_from_bytes`](Self::detect_from_bytes), with provenance.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Detection {
        let len = bytes.len().min(self.signatures.max_pattern_len());
        self.classify_prefix(&bytes[..len])
    }

    /// Whether `mime` is a type this detector can return.
    pub fn is_known_mime(&self, mime: &str) -> bool {
        mime == DEFAULT_MIME_TYPE
            || self.extensions.contains_mime(mime)
            || self.signatures.contains_mime(mime)
    }

    fn classify_prefix(&self, prefix: &[u8]) -> Detection {
        match SignatureMatcher::new(self.signatures).find(prefix) {
            Some(mime) => Detection {
                mime,
                source: MatchSource::Signature,
            },
            None => Detection::FALLBACK,
        }
    }

    #[inline]
    fn prefix_reader(&self) -> PrefixReader {
        PrefixReader::new(self.signatures.max_pattern_len())
    }

    fn normalize_extension<'a>(&self, ext: &'a str) -> Cow<'a, str> {
        if self.options.fold_extension_case && ext.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(ext.to_ascii_lowercase())
        } else {
            Cow::Borrowed(ext)
        }
    }
}

/// Text after the last `.` of the file name, if any and non-empty.
///
/// Unlike [`Path::extension`], a leading dot counts: `.bashrc` has the
/// extension `bashrc`.
pub fn file_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let idx = name.rfind('.')?;
    let ext = &name[idx + 1..];
    if ext.is_empty() { None } else { Some(ext) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Seek, SeekFrom};

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(Path::new("readme.txt")), Some("txt"));
        assert_eq!(file_extension(Path::new("archive.tar.gz")), Some("gz"));
        assert_eq!(file_extension(Path::new("dir.d/file")), None);
        assert_eq!(file_extension(Path::new("noext")), None);
        assert_eq!(file_extension(Path::new("trailing.")), None);
        assert_eq!(file_extension(Path::new(".bashrc")), Some("bashrc"));
        assert_eq!(file_extension(Path::new("/tmp/Photo.JPG")), Some("JPG"));
    }

    #[test]
    fn test_extension_phase_needs_no_file() {
        let detection = Detector::new().classify("does/not/exist/readme.txt");
        assert_eq!(detection.mime, "text/plain");
        assert_eq!(detection.source, MatchSource::Extension);
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(Detector::new().detect("REPORT.PDF"), "application/pdf");

        let exact = Detector::with_options(DetectOptions::new().with_fold_extension_case(false));
        assert_eq!(exact.detect("missing-dir/REPORT.PDF"), DEFAULT_MIME_TYPE);
        assert_eq!(exact.detect("report.pdf"), "application/pdf");
    }

    #[test]
    fn test_missing_file_falls_back() {
        let detection = Detector::new().classify("missing.unknownext");
        assert!(detection.is_fallback());
        assert_eq!(detection.mime, DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_sniffing_disabled() {
        let mut file = tempfile::Builder::new().suffix(".foo").tempfile().unwrap();
        std::io::Write::write_all(&mut file, &[0x50, 0x4B, 0x03, 0x04]).unwrap();

        let detector = Detector::with_options(DetectOptions::new().with_sniff_on_extension_miss(false));
        assert!(!detector.options().sniff_on_extension_miss);
        assert!(detector.options().fold_extension_case);
        assert_eq!(detector.detect(file.path()), DEFAULT_MIME_TYPE);
        assert_eq!(Detector::new().detect(file.path()), "application/zip");
    }

    #[test]
    fn test_detect_from_reader_restores_position() {
        let mut cursor = Cursor::new(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3".to_vec());
        cursor.seek(SeekFrom::Start(3)).unwrap();

        let detection = Detector::new().classify_reader(&mut cursor);
        assert_eq!(detection.mime, "application/pdf");
        assert_eq!(detection.source, MatchSource::Signature);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_detect_from_bytes() {
        let detector = Detector::new();
        assert_eq!(detector.detect_from_bytes(b"\x1F\x8B\x08\x00"), "application/gzip");
        assert_eq!(detector.detect_from_bytes(b""), DEFAULT_MIME_TYPE);
        assert_eq!(detector.detect_from_bytes(b"plain words"), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_detect_from_bytes_ignores_tail() {
        let mut data = vec![0u8; 4096];
        data[4000..4004].copy_from_slice(&[0x50, 0x4B, 0x03, 0x04]);
        assert_eq!(Detector::new().detect_from_bytes(&data), DEFAULT_MIME_TYPE);
    }

    #[test]
    fn test_prefix_reader_covers_longest_signature() {
        let detector = Detector::new();
        assert_eq!(detector.options(), &DetectOptions::default());
        assert_eq!(detector.prefix_reader().max_len(), BUILTIN_SIGNATURES.max_pattern_len());
        assert_eq!(detector.prefix_reader().max_len(), 16);
    }

    #[test]
    fn test_is_known_mime() {
        let detector = Detector::new();
        assert!(detector.is_known_mime("application/octet-stream"));
        assert!(detector.is_known_mime("text/plain"));
        assert!(detector.is_known_mime("image/png"));
        assert!(!detector.is_known_mime("application/x-made-up"));
    }
}
