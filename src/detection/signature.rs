//! Signature table: magic-number patterns to MIME type.
//!
//! Entries are validated and ordered once, when the table is built. Ordering
//! is by number of fixed bytes, longest first, so a specific signature such as
//! PNG's eight-byte header is always tried before a short generic one. Entries
//! with equal fixed length keep their declaration order.

use std::borrow::Cow;

use once_cell::sync::Lazy;

use super::types::{Segment, SignatureEntry};
use crate::error::Result;

const fn fixed(hex: &'static str) -> Segment {
    Segment::Fixed(Cow::Borrowed(hex))
}

const fn skip(n: usize) -> Segment {
    Segment::Skip(n)
}

/// Built-in signatures, in declaration order.
pub static SIGNATURES: &[(&[Segment], &str)] = &[
    (&[fixed("667479703367")], "video/3gpp"),
    (&[fixed("377ABCAF271C")], "application/x-7z-compressed"),
    (&[fixed("464F524D"), skip(4), fixed("41494646")], "audio/x-aiff"),
    (&[fixed("3026B2758E66CF11A6D900AA0062CE6C")], "audio/x-ms-wma"),
    (&[fixed("52494646"), skip(4), fixed("41564920")], "video/x-msvideo"),
    (&[fixed("424D")], "image/bmp"),
    (&[fixed("425A68")], "application/x-bzip2"),
    (&[fixed("4D534346")], "application/vnd.ms-cab-compressed"),
    (&[fixed("CAFEBABE")], "application/java-vm"),
    (&[fixed("213C617263683E")], "application/x-debian-package"),
    (&[fixed("3082")], "application/x-x509-ca-cert"),
    (&[fixed("41542654464F524D"), skip(4), fixed("444A56")], "image/vnd.djvu"),
    (&[fixed("7801730D626260")], "application/x-apple-diskimage"),
    (&[fixed("4D5A")], "application/x-msdownload"),
    (&[fixed("474946383761")], "image/gif"),
    (&[fixed("474946383961")], "image/gif"),
    (&[fixed("1F8B")], "application/gzip"),
    (&[fixed("00000100")], "image/x-icon"),
    (&[fixed("FFD8FFDB")], "image/jpg"),
    (&[fixed("FFD8FFE0"), skip(2), fixed("4A4649460001")], "image/jpeg"),
    (&[fixed("FFD8FFE1"), skip(2), fixed("457869660000")], "image/jpeg"),
    (&[fixed("4D546864")], "audio/midi"),
    (&[fixed("1A45DFA3")], "video/webm"),
    (&[fixed("FFFB")], "audio/mpeg"),
    (&[fixed("494433")], "audio/mpeg"),
    (&[fixed("000001BA")], "video/mpeg"),
    (&[fixed("47")], "video/mpeg"),
    (&[fixed("000001B3")], "video/mpeg"),
    (&[fixed("4F676753")], "application/ogg"),
    (&[fixed("25504446")], "application/pdf"),
    (&[fixed("89504E470D0A1A0A")], "image/png"),
    (&[fixed("38425053")], "image/vnd.adobe.photoshop"),
    (&[fixed("526172211A070100")], "application/x-rar-compressed"),
    (&[fixed("526172211A0700")], "application/x-rar-compressed"),
    (&[fixed("7B5C72746631")], "application/rtf"),
    (&[fixed("435753")], "application/x-shockwave-flash"),
    (&[fixed("465753")], "application/x-shockwave-flash"),
    (&[fixed("7573746172003030")], "application/x-tar"),
    (&[fixed("7573746172202000")], "application/x-tar"),
    (&[fixed("49492A00")], "image/tiff"),
    (&[fixed("4D4D002A")], "image/tiff"),
    (&[fixed("52494646"), skip(4), fixed("57415645")], "audio/x-wav"),
    (&[fixed("52494646"), skip(4), fixed("57454250")], "image/webp"),
    (&[fixed("774F4646")], "application/x-font-woff"),
    (&[fixed("3c3f786d6c20")], "application/xml"),
    (&[fixed("504B0304")], "application/zip"),
    (&[fixed("504B0506")], "application/zip"),
    (&[fixed("504B0708")], "application/zip"),
];

/// Process-wide built-in signature table.
///
/// # Panics
///
/// Panics on first access if a built-in entry is malformed.
pub static BUILTIN_SIGNATURES: Lazy<SignatureTable> = Lazy::new(|| {
    let entries = SIGNATURES
        .iter()
        .map(|(pattern, mime)| SignatureEntry::new(pattern.to_vec(), *mime));

    match SignatureTable::new(entries) {
        Ok(table) => {
            tracing::trace!(
                entries = table.len(),
                max_pattern_len = table.max_pattern_len(),
                "built signature table"
            );
            table
        },
        Err(e) => panic!("built-in signature table is malformed: {e}"),
    }
});

/// Ordered, validated collection of signature entries.
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    entries: Vec<SignatureEntry>,
    max_pattern_len: usize,
}

impl SignatureTable {
    /// Validate and order `entries`.
    ///
    /// Fixed segments are checked to be whole hex bytes and upper-cased, and
    /// no entry may span more than [`MAX_PATTERN_SPAN`](super::types::MAX_PATTERN_SPAN)
    /// bytes. The first malformed entry aborts construction.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = SignatureEntry>,
    {
        let mut entries = entries
            .into_iter()
            .map(SignatureEntry::normalize)
            .collect::<Result<Vec<_>>>()?;

        // Stable: ties keep declaration order
        entries.sort_by(|a, b| b.fixed_len().cmp(&a.fixed_len()));

        let max_pattern_len = entries.iter().map(SignatureEntry::span).max().unwrap_or(0);

        Ok(Self {
            entries,
            max_pattern_len,
        })
    }

    /// Entries in matching order.
    pub fn entries(&self) -> &[SignatureEntry] {
        &self.entries
    }

    /// Number of leading bytes that must be read to evaluate every entry.
    #[inline]
    pub fn max_pattern_len(&self) -> usize {
        self.max_pattern_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry reports `mime`.
    pub fn contains_mime(&self, mime: &str) -> bool {
        self.entries.iter().any(|e| e.mime() == mime)
    }
}
