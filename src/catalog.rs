//! This module provides the `Catalog` struct, which scans a directory of `.po`
//! files once and answers per-language lookups afterwards.
//!
//! Every matching file contributes its records under the file's language tag
//! and appends that tag to the language list. Later files overwrite earlier
//! ones for the same (key, language) pair. The catalog is read-only once built.

use std::{
    borrow::Cow,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error as ThisError;
use tracing::{debug, warn};

use crate::{
    error::Error,
    formats::po::Format,
    load_options::LoadOptions,
    types::{CatalogIndex, TranslationEntry},
};

/// Why a lookup found nothing.
#[derive(ThisError, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMiss {
    #[error("translation missing from the translated strings")]
    MissingKey,

    #[error("language missing")]
    MissingLanguage,
}

/// Translations loaded from a directory, indexed by key and then language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    index: CatalogIndex,
    languages: Vec<String>,
}

impl Catalog {
    /// Loads every `.po` file in `dir` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Directory`] if `dir` cannot be listed, and
    /// [`Error::Io`] if a listed file cannot be read.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, Error> {
        Self::load_with_options(dir, &LoadOptions::default())
    }

    /// Loads every file in `dir` whose name ends with the configured extension.
    pub fn load_with_options<P: AsRef<Path>>(
        dir: P,
        options: &LoadOptions,
    ) -> Result<Self, Error> {
        let dir = dir.as_ref();
        debug!(dir = %dir.display(), "loading translation catalog");

        let mut catalog = Catalog::default();
        for path in scan_directory(dir, options)? {
            catalog.read_file(&path, options)?;
        }
        Ok(catalog)
    }

    /// Parses one file into the catalog. A file that disappeared since the
    /// directory scan contributes nothing.
    fn read_file(&mut self, path: &Path, options: &LoadOptions) -> Result<(), Error> {
        if !path.exists() {
            debug!(path = %path.display(), "file vanished before parsing, skipping");
            return Ok(());
        }

        match Format::read_with_default_language(path, &options.default_language) {
            Ok(format) => {
                debug!(
                    path = %path.display(),
                    language = %format.language,
                    records = format.records.len(),
                    "parsed translation file"
                );
                self.add_format(format);
                Ok(())
            }
            Err(Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "file vanished before parsing, skipping");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn add_format(&mut self, format: Format) {
        let Format { language, records } = format;
        for record in records {
            self.index
                .entry(record.key)
                .or_default()
                .insert(language.clone(), record.entry);
        }
        self.languages.push(language);
    }

    /// Language tags in processing order, one per file. Duplicates are kept.
    pub fn get_translation_list(&self) -> &[String] {
        &self.languages
    }

    /// Looks up the stored entry for `(key, language)` without logging.
    pub fn lookup(&self, key: &str, language: &str) -> Result<&TranslationEntry, LookupMiss> {
        self.index
            .get(key)
            .ok_or(LookupMiss::MissingKey)?
            .get(language)
            .ok_or(LookupMiss::MissingLanguage)
    }

    /// Returns the entry for `(key, language)`.
    ///
    /// On a miss a warning is logged and [`TranslationEntry::placeholder`] is
    /// returned, so callers always get a `trans` of at least `" "`. A stored
    /// entry is returned as written and may lack any of its fields.
    pub fn get_entry_for_key(&self, key: &str, language: &str) -> Cow<'_, TranslationEntry> {
        match self.lookup(key, language) {
            Ok(entry) => Cow::Borrowed(entry),
            Err(miss) => {
                warn!(%key, %language, "{miss}");
                Cow::Owned(TranslationEntry::placeholder())
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All catalog keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Languages that have an entry for `key`, in sorted order.
    pub fn languages_for_key(&self, key: &str) -> impl Iterator<Item = &str> {
        self.index
            .get(key)
            .into_iter()
            .flat_map(|languages| languages.keys().map(String::as_str))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl FromIterator<Format> for Catalog {
    /// Builds a catalog from already parsed files, in iteration order.
    fn from_iter<I: IntoIterator<Item = Format>>(iter: I) -> Self {
        let mut catalog = Catalog::default();
        for format in iter {
            catalog.add_format(format);
        }
        catalog
    }
}

/// Lists the input files of `dir`: names ending in the configured suffix that
/// resolve to regular files.
fn scan_directory(dir: &Path, options: &LoadOptions) -> Result<Vec<PathBuf>, Error> {
    let entries = fs::read_dir(dir).map_err(|err| Error::directory(dir, err))?;
    let suffix = options.suffix();

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| Error::directory(dir, err))?;
        let path = entry.path();

        if !entry.file_name().to_string_lossy().ends_with(&suffix) {
            debug!(path = %path.display(), "skipping file with other extension");
            continue;
        }
        // Follows symlinks: a link to a regular file counts, a dangling link does not.
        if !fs::metadata(&path).is_ok_and(|metadata| metadata.is_file()) {
            debug!(path = %path.display(), "skipping non-regular entry");
            continue;
        }
        paths.push(path);
    }

    if options.sorted {
        paths.sort();
    }
    Ok(paths)
}
