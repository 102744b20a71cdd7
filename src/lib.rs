#![forbid(unsafe_code)]
//! Translation catalog loader for gettext `.po` files.
//!
//! A [`Catalog`] scans a directory once, parses every `.po` file it finds and
//! indexes the records by original text (or `msgctxt`) and language tag.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use po_catalog::Catalog;
//!
//! let catalog = Catalog::load("translations")?;
//! for language in catalog.get_translation_list() {
//!     let entry = catalog.get_entry_for_key("Chapter 1", language);
//!     println!("{language}: {}", entry.trans_or_placeholder());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Only a subset of the PO grammar is read: `msgid`, `msgstr`, `msgctxt`,
//! continuation lines, translator comments (`# `) and extracted comments
//! (`#. `). Plural forms, flags and obsolete entries are ignored, and files are
//! never written.

pub mod catalog;
pub mod error;
pub mod formats;
pub mod load_options;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::{Catalog, LookupMiss},
    error::Error,
    formats::PoFormat,
    load_options::LoadOptions,
    types::TranslationEntry,
};
