//! Core types shared by the parser and the catalog.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

/// The `trans` value handed out when a lookup misses.
pub const PLACEHOLDER_TRANSLATION: &str = " ";

/// The stored data for one (key, language) pair.
///
/// Every field is optional: a record only carries what its PO block contained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationEntry {
    /// Translated string (`msgstr`, continuation lines appended).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub trans: Option<String>,

    /// Raw translator comment lines (`# ...`), concatenated with their line
    /// terminators.
    #[serde(rename = "translComment")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub translator_comment: Option<String>,

    /// The last raw extracted comment line (`#. ...`) of the record.
    #[serde(rename = "extract")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub extracted_comment: Option<String>,
}

impl TranslationEntry {
    /// The entry returned for a missing key or language: `trans` is a single
    /// space and nothing else is set.
    pub fn placeholder() -> Self {
        TranslationEntry {
            trans: Some(PLACEHOLDER_TRANSLATION.to_string()),
            ..Default::default()
        }
    }

    /// Returns the translation, or the placeholder when the record had no `msgstr`.
    pub fn trans_or_placeholder(&self) -> &str {
        self.trans.as_deref().unwrap_or(PLACEHOLDER_TRANSLATION)
    }

    pub fn is_empty(&self) -> bool {
        self.trans.is_none()
            && self.translator_comment.is_none()
            && self.extracted_comment.is_none()
    }
}

impl Display for TranslationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TranslationEntry {{ trans: {:?}, translComment: {:?}, extract: {:?} }}",
            self.trans, self.translator_comment, self.extracted_comment
        )
    }
}

/// Language tag → entry, for a single catalog key.
pub type LanguageEntries = BTreeMap<String, TranslationEntry>;

/// Catalog key → per-language entries.
pub type CatalogIndex = BTreeMap<String, LanguageEntries>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_only_single_space_trans() {
        let entry = TranslationEntry::placeholder();
        assert_eq!(entry.trans.as_deref(), Some(" "));
        assert!(entry.translator_comment.is_none());
        assert!(entry.extracted_comment.is_none());
        assert!(!entry.is_empty());
    }

    #[test]
    fn test_trans_or_placeholder() {
        let empty = TranslationEntry::default();
        assert!(empty.is_empty());
        assert_eq!(empty.trans_or_placeholder(), " ");

        let entry = TranslationEntry {
            trans: Some("Bonjour".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.trans_or_placeholder(), "Bonjour");
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = TranslationEntry {
            trans: Some("Salut".to_string()),
            translator_comment: Some("# informal\n".to_string()),
            extracted_comment: Some("#. page 3\n".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["trans"], "Salut");
        assert_eq!(json["translComment"], "# informal\n");
        assert_eq!(json["extract"], "#. page 3\n");

        let placeholder = serde_json::to_string(&TranslationEntry::placeholder()).unwrap();
        assert_eq!(placeholder, r#"{"trans":" "}"#);
    }

    #[test]
    fn test_deserialize_exported_entry() {
        let entry: TranslationEntry =
            serde_json::from_str(r##"{"trans":"Hallo","translComment":"# casual\n"}"##).unwrap();
        assert_eq!(entry.trans.as_deref(), Some("Hallo"));
        assert_eq!(entry.translator_comment.as_deref(), Some("# casual\n"));
        assert!(entry.extracted_comment.is_none());

        let empty: TranslationEntry = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
