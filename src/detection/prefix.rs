//! Bounded prefix reading.
//!
//! Only the first `max_len` bytes of a file are ever read, so the cost of a
//! detection does not depend on file size.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use smallvec::SmallVec;

use crate::error::Result;

/// Leading bytes of a file. Inline capacity covers every built-in signature.
pub type Prefix = SmallVec<[u8; 32]>;

/// Reads at most `max_len` bytes from offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixReader {
    max_len: usize,
}

impl PrefixReader {
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Read the prefix from an open reader.
    ///
    /// The reader is rewound to offset 0 before reading and again afterwards,
    /// so callers can keep using the handle. Returns fewer than `max_len`
    /// bytes when the input is shorter.
    pub fn read_from<R: Read + Seek>(&self, reader: &mut R) -> Result<Prefix> {
        reader.seek(SeekFrom::Start(0))?;
        let prefix = self.read_bounded(reader)?;
        reader.seek(SeekFrom::Start(0))?;
        Ok(prefix)
    }

    /// Read the prefix of the file at `path`.
    ///
    /// Never fails: a path that is missing, unreadable, or not a regular file
    /// (directory, FIFO, device, socket) yields an empty prefix, which matches
    /// no signature. Non-regular files are never opened, so a FIFO without a
    /// writer cannot block. The handle is closed before this returns.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Prefix {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {},
            Ok(meta) => {
                tracing::debug!(path = %path.display(), file_type = ?meta.file_type(), "not a regular file, skipping sniff");
                return Prefix::new();
            },
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot stat file for sniffing");
                return Prefix::new();
            },
        }

        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot open file for sniffing");
                return Prefix::new();
            },
        };

        // The path may have been swapped between the stat and the open
        match file.metadata() {
            Ok(meta) if meta.is_file() => {},
            Ok(meta) => {
                tracing::debug!(path = %path.display(), file_type = ?meta.file_type(), "not a regular file, skipping sniff");
                return Prefix::new();
            },
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot stat open file");
                return Prefix::new();
            },
        }

        match self.read_bounded(&mut file) {
            Ok(prefix) => prefix,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot read file prefix");
                Prefix::new()
            },
        }
    }

    /// Fill up to `max_len` bytes, stopping early at end of input.
    fn read_bounded<R: Read>(&self, reader: &mut R) -> Result<Prefix> {
        let mut buf = Prefix::from_elem(0, self.max_len);
        let mut filled = 0;

        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        buf.truncate(filled);
        tracing::trace!(requested = self.max_len, read = filled, "read prefix");
        Ok(buf)
    }
}
