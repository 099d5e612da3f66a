//! Detector configuration.

/// Options controlling how a [`Detector`](super::Detector) resolves a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Lower-case the extension before looking it up, so `REPORT.PDF` is
    /// treated like `report.pdf`
    pub fold_extension_case: bool,
    /// Read the file and try signatures when the extension is unknown
    pub sniff_on_extension_miss: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            fold_extension_case: true,
            sniff_on_extension_miss: true,
        }
    }
}

impl DetectOptions {
    /// Create a new `DetectOptions` with default values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mimesniff::DetectOptions;
    ///
    /// let options = DetectOptions::new();
    /// assert!(options.fold_extension_case);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether extensions are lower-cased before lookup.
    ///
    /// Disabling this gives exact, case-sensitive matching against the
    /// all-lower-case built-in table: `FILE.PDF` then misses the extension
    /// phase and falls through to signature sniffing.
    #[inline]
    pub fn with_fold_extension_case(mut self, fold: bool) -> Self {
        self.fold_extension_case = fold;
        self
    }

    /// Set whether an unknown extension triggers a prefix read.
    ///
    /// When disabled, detection never touches the filesystem and an unknown
    /// extension resolves directly to the default type.
    #[inline]
    pub fn with_sniff_on_extension_miss(mut self, sniff: bool) -> Self {
        self.sniff_on_extension_miss = sniff;
        self
    }
}
