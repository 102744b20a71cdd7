//! Options controlling how [`crate::Catalog`] scans a translation directory.

use crate::formats::po::{DEFAULT_LANGUAGE, EXTENSION};

/// Load behavior options for [`crate::Catalog::load_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// File extension (without the dot) selecting input files.
    pub extension: String,
    /// Language tag for files without a `Language:` header.
    pub default_language: String,
    /// Process files in file-name order instead of directory-scan order.
    pub sorted: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            extension: EXTENSION.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            sorted: false,
        }
    }
}

impl LoadOptions {
    /// Creates default load options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Sets the fallback language tag.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    /// Enables/disables file-name ordering.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// The file-name suffix an input file must end with, e.g. `.po`.
    pub(crate) fn suffix(&self) -> String {
        format!(".{}", self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::new();
        assert_eq!(options.extension, "po");
        assert_eq!(options.default_language, "en");
        assert!(!options.sorted);
        assert_eq!(options.suffix(), ".po");
    }

    #[test]
    fn test_builder() {
        let options = LoadOptions::new()
            .with_extension(".pot")
            .with_default_language("fr")
            .with_sorted(true);
        assert_eq!(options.extension, "pot");
        assert_eq!(options.suffix(), ".pot");
        assert_eq!(options.default_language, "fr");
        assert!(options.sorted);
    }
}
