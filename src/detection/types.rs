//! Core detection types: signature descriptors and detection results.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// MIME type returned when neither the extension nor the signature phase
/// produces a match.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Largest number of leading bytes a single signature may cover.
pub const MAX_PATTERN_SPAN: usize = 64 * 1024;

/// One piece of a magic-number pattern.
///
/// A pattern is an ordered run of segments matched from offset 0 of the file:
/// fixed byte runs that must appear verbatim, optionally separated by skips
/// that accept any byte values (typically a length or size field).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Bytes that must match exactly, written as hex digits (two per byte)
    Fixed(Cow<'static, str>),
    /// Number of arbitrary bytes to step over
    Skip(usize),
}

impl Segment {
    /// Create a fixed segment from hex digits, e.g. `Segment::fixed("504B0304")`.
    pub fn fixed(hex: impl Into<Cow<'static, str>>) -> Self {
        Segment::Fixed(hex.into())
    }

    /// Create a skip segment of `n` bytes.
    pub const fn skip(n: usize) -> Self {
        Segment::Skip(n)
    }

    /// Number of file bytes this segment covers.
    pub fn byte_len(&self) -> usize {
        match self {
            Segment::Fixed(hex) => hex.len() / 2,
            Segment::Skip(n) => *n,
        }
    }

    /// Number of hex characters this segment covers in an encoded prefix.
    #[inline]
    pub fn hex_len(&self) -> usize {
        self.byte_len().saturating_mul(2)
    }

    /// Validate the segment and bring fixed runs to upper case so they compare
    /// against an upper-case encoded prefix.
    pub(crate) fn normalize(self, mime: &str) -> Result<Self> {
        match self {
            Segment::Fixed(digits) => {
                if digits.is_empty() {
                    return Err(Error::InvalidHex {
                        pattern: String::new(),
                        reason: "empty fixed segment".to_string(),
                    });
                }
                hex::decode(digits.as_bytes()).map_err(|e| Error::InvalidHex {
                    pattern: digits.to_string(),
                    reason: e.to_string(),
                })?;

                if digits.bytes().any(|b| b.is_ascii_lowercase()) {
                    Ok(Segment::Fixed(Cow::Owned(digits.to_ascii_uppercase())))
                } else {
                    Ok(Segment::Fixed(digits))
                }
            },
            Segment::Skip(0) => Err(Error::ZeroSkip {
                mime: mime.to_string(),
            }),
            skip @ Segment::Skip(_) => Ok(skip),
        }
    }
}

/// A magic-number pattern and the MIME type it identifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    pattern: Vec<Segment>,
    mime: &'static str,
}

impl SignatureEntry {
    /// Create an entry. Validation happens when the entry is added to a
    /// [`SignatureTable`](super::signature::SignatureTable).
    pub fn new(pattern: impl Into<Vec<Segment>>, mime: &'static str) -> Self {
        Self {
            pattern: pattern.into(),
            mime,
        }
    }

    /// The segments making up this pattern, in file order.
    pub fn pattern(&self) -> &[Segment] {
        &self.pattern
    }

    /// The MIME type reported when this pattern matches.
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// Total number of fixed (non-wildcard) bytes. Used as the specificity key.
    pub fn fixed_len(&self) -> usize {
        self.pattern
            .iter()
            .filter(|s| matches!(s, Segment::Fixed(_)))
            .map(Segment::byte_len)
            .sum()
    }

    /// Number of leading file bytes needed to evaluate the whole pattern.
    /// Saturates at `usize::MAX` for unvalidated entries.
    pub fn span(&self) -> usize {
        self.checked_span().unwrap_or(usize::MAX)
    }

    fn checked_span(&self) -> Option<usize> {
        self.pattern
            .iter()
            .try_fold(0usize, |acc, s| acc.checked_add(s.byte_len()))
    }

    pub(crate) fn normalize(self) -> Result<Self> {
        let mime = self.mime;
        let pattern = self
            .pattern
            .into_iter()
            .map(|s| s.normalize(mime))
            .collect::<Result<Vec<_>>>()?;

        let entry = Self { pattern, mime };
        match entry.checked_span() {
            Some(span) if span <= MAX_PATTERN_SPAN => {},
            _ => {
                return Err(Error::PatternTooLong {
                    mime: mime.to_string(),
                    max: MAX_PATTERN_SPAN,
                });
            },
        }
        if entry.fixed_len() == 0 {
            return Err(Error::EmptySignature {
                mime: mime.to_string(),
            });
        }
        Ok(entry)
    }
}

/// Which phase of detection produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchSource {
    /// The filename extension was found in the extension table
    Extension,
    /// A magic-number signature matched the file prefix
    Signature,
    /// Nothing matched; the default type was returned
    Fallback,
}

/// A detected MIME type together with how it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Detection {
    /// The MIME type string
    pub mime: &'static str,
    /// The phase that resolved it
    pub source: MatchSource,
}

impl Detection {
    pub(crate) const FALLBACK: Detection = Detection {
        mime: DEFAULT_MIME_TYPE,
        source: MatchSource::Fallback,
    };

    /// `true` when the result is the default type because nothing matched.
    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.source == MatchSource::Fallback
    }
}
