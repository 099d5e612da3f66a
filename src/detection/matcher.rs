//! Signature matching against an encoded byte prefix.

use super::signature::SignatureTable;
use super::types::Segment;

/// Encode bytes as upper-case hex, two characters per byte, no separators.
#[inline]
pub fn encode_prefix(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Test whether `hex` starts with `pattern`.
///
/// Fixed segments must match the encoded text exactly. A skip of `n` bytes
/// consumes `2n` characters regardless of their value. No segment may run past
/// the end of `hex`; anything after the pattern is ignored.
pub fn pattern_matches(pattern: &[Segment], hex: &str) -> bool {
    let mut pos: usize = 0;

    for segment in pattern {
        let end = match pos.checked_add(segment.hex_len()) {
            Some(end) if end <= hex.len() => end,
            _ => return false,
        };
        if let Segment::Fixed(expected) = segment
            && hex.get(pos..end) != Some(&**expected)
        {
            return false;
        }
        pos = end;
    }

    true
}

/// Finds the first matching entry of a [`SignatureTable`].
#[derive(Debug, Clone, Copy)]
pub struct SignatureMatcher<'a> {
    table: &'a SignatureTable,
}

impl<'a> SignatureMatcher<'a> {
    pub fn new(table: &'a SignatureTable) -> Self {
        Self { table }
    }

    /// Match raw prefix bytes. Returns `None` when no entry matches, including
    /// for an empty prefix.
    pub fn find(&self, prefix: &[u8]) -> Option<&'static str> {
        if prefix.is_empty() {
            return None;
        }
        self.find_hex(&encode_prefix(prefix))
    }

    /// Match an already encoded, upper-case hex prefix.
    pub fn find_hex(&self, hex: &str) -> Option<&'static str> {
        self.table
            .entries()
            .iter()
            .find(|entry| pattern_matches(entry.pattern(), hex))
            .map(|entry| entry.mime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::signature::BUILTIN_SIGNATURES;
    use crate::detection::types::SignatureEntry;

    fn builtin() -> SignatureMatcher<'static> {
        SignatureMatcher::new(&BUILTIN_SIGNATURES)
    }

    #[test]
    fn test_encode_prefix() {
        assert_eq!(encode_prefix(&[0x89, 0x50, 0x4E, 0x47]), "89504E47");
        assert_eq!(encode_prefix(&[0x00, 0x0a, 0xff]), "000AFF");
        assert_eq!(encode_prefix(&[]), "");
    }

    #[test]
    fn test_pattern_fixed_and_skip() {
        let wav = [Segment::fixed("52494646"), Segment::skip(4), Segment::fixed("57415645")];
        assert!(pattern_matches(&wav, "52494646DEADBEEF57415645"));
        assert!(pattern_matches(&wav, "524946460000000057415645666D7420"));
        assert!(!pattern_matches(&wav, "52494646DEADBEEF41564920"));
        // Skip may not run past the end
        assert!(!pattern_matches(&wav, "52494646DEAD"));
    }

    #[test]
    fn test_pattern_trailing_skip_needs_bytes() {
        let pattern = [Segment::fixed("AA"), Segment::skip(2)];
        assert!(!pattern_matches(&pattern, "AA00"));
        assert!(pattern_matches(&pattern, "AA0000"));
    }

    #[test]
    fn test_pattern_huge_skip_does_not_overflow() {
        let pattern = [Segment::fixed("AA"), Segment::skip(usize::MAX)];
        assert!(!pattern_matches(&pattern, "AA0000"));
    }

    #[test]
    fn test_builtin_png() {
        let png = [0x89u8, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
        assert_eq!(builtin().find(&png), Some("image/png"));
    }

    #[test]
    fn test_builtin_riff_variants() {
        let mut riff = *b"RIFF\x24\x08\x00\x00WAVEfmt ";
        assert_eq!(builtin().find(&riff), Some("audio/x-wav"));
        riff[8..12].copy_from_slice(b"WEBP");
        assert_eq!(builtin().find(&riff), Some("image/webp"));
        riff[8..12].copy_from_slice(b"AVI ");
        assert_eq!(builtin().find(&riff), Some("video/x-msvideo"));
    }

    #[test]
    fn test_builtin_jpeg_with_length_skip() {
        let jfif = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01];
        assert_eq!(builtin().find(&jfif), Some("image/jpeg"));
        let raw = [0xFFu8, 0xD8, 0xFF, 0xDB, 0x00, 0x43];
        assert_eq!(builtin().find(&raw), Some("image/jpg"));
    }

    #[test]
    fn test_builtin_xml_matches_after_normalization() {
        assert_eq!(builtin().find(b"<?xml version=\"1.0\"?>"), Some("application/xml"));
    }

    #[test]
    fn test_short_prefix_cannot_match_longer_pattern() {
        // Truncated PNG header; no shorter signature starts with 0x89
        assert_eq!(builtin().find(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]), None);
    }

    #[test]
    fn test_empty_prefix() {
        assert_eq!(builtin().find(&[]), None);
        assert_eq!(builtin().find_hex(""), None);
    }

    #[test]
    fn test_longer_signature_wins() {
        let table = SignatureTable::new([
            SignatureEntry::new(vec![Segment::fixed("504B")], "x/short"),
            SignatureEntry::new(vec![Segment::fixed("504B0304")], "x/long"),
        ])
        .unwrap();
        let matcher = SignatureMatcher::new(&table);
        assert_eq!(matcher.find(&[0x50, 0x4B, 0x03, 0x04]), Some("x/long"));
        assert_eq!(matcher.find(&[0x50, 0x4B, 0x05, 0x06]), Some("x/short"));
    }

    #[test]
    fn test_rar_v5_preferred_over_v4() {
        let rar5 = [0x52u8, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x01, 0x00];
        assert_eq!(builtin().find(&rar5), Some("application/x-rar-compressed"));
    }

    #[test]
    fn test_single_byte_signature_is_last_resort() {
        // 'G' alone is the MPEG transport stream sync byte
        assert_eq!(builtin().find(b"Gxyz"), Some("video/mpeg"));
        assert_eq!(builtin().find(b"GIF89a"), Some("image/gif"));
    }
}
