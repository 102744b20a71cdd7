use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor, Read},
    path::Path,
};

use encoding_rs_io::DecodeReaderBytesBuilder;
use tracing::{debug, trace};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, traits::Parser, types::TranslationEntry};

/// File extension of gettext translation files.
pub const EXTENSION: &str = "po";

/// Header line prefix carrying the file's language tag.
pub const LANGUAGE_HEADER: &str = "\"Language: ";

/// Language tag used when a file has no `Language:` header.
pub const DEFAULT_LANGUAGE: &str = "en";

const MSGID: &str = "msgid ";
const MSGSTR: &str = "msgstr ";
const MSGCTXT: &str = "msgctxt ";
const TRANSLATOR_COMMENT: &str = "# ";
const EXTRACTED_COMMENT: &str = "#. ";

/// A parsed gettext `.po` file.
///
/// Only the subset needed for lookups is understood: `msgid`, `msgstr`,
/// `msgctxt`, continuation lines, translator comments (`# `) and extracted
/// comments (`#. `). Plural forms, flags and obsolete entries are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// Tag from the `"Language: xx\n"` header line, or the default language.
    pub language: String,
    /// Finalized records in file order. A key may repeat; the later one wins
    /// once the records are indexed.
    pub records: Vec<Record>,
}

/// One finalized PO block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The raw `msgctxt` remainder (quotes and line terminator kept) if
    /// present, otherwise the unescaped `msgid`.
    pub key: String,
    pub entry: TranslationEntry,
}

impl Format {
    /// Reads `path` in two passes: a header pass for the language tag, then a
    /// body pass over a freshly opened file for the records.
    pub fn read_with_default_language<P: AsRef<Path>>(
        path: P,
        default_language: &str,
    ) -> Result<Self, Error> {
        let path = path.as_ref();

        let language = scan_language(open_decoded(path)?)?;
        let records = scan_records(open_decoded(path)?)?;

        Ok(Format {
            language: resolve_language(language, default_language, path),
            records,
        })
    }

    /// Parses already-open input. The input is buffered once so both passes
    /// can run over it.
    pub fn from_reader_with_default_language<R: BufRead>(
        reader: R,
        default_language: &str,
    ) -> Result<Self, Error> {
        let mut decoder = decoder_builder().build(reader);
        let mut content = String::new();
        decoder.read_to_string(&mut content).map_err(Error::Io)?;

        let language = scan_language(Cursor::new(content.as_bytes()))?;
        let records = scan_records(Cursor::new(content.as_bytes()))?;

        Ok(Format {
            language: resolve_language(language, default_language, "<reader>"),
            records,
        })
    }

    /// Parses the language tag as a BCP-47 identifier, if it is one.
    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.language.parse().ok()
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Self::from_reader_with_default_language(reader, DEFAULT_LANGUAGE)
    }

    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::read_with_default_language(path, DEFAULT_LANGUAGE)
    }
}

/// Undoes the three escapes the catalog understands: `\"`, `\'` and `\#`.
///
/// Nothing else is touched, so `\\` and `\n` stay as written.
pub fn unescape(value: &str) -> String {
    value
        .replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\#", "#")
}

// Auto-detect BOM, decode UTF-16 to UTF-8. UTF-8 passes through untouched
// so invalid bytes still fail the read instead of becoming U+FFFD.
fn decoder_builder() -> DecodeReaderBytesBuilder {
    let mut builder = DecodeReaderBytesBuilder::new();
    builder.bom_override(true).utf8_passthru(true).strip_bom(true);
    builder
}

fn open_decoded(path: &Path) -> Result<impl BufRead, Error> {
    let file = File::open(path).map_err(Error::Io)?;
    Ok(BufReader::new(decoder_builder().build(file)))
}

fn resolve_language(
    found: Option<String>,
    default_language: &str,
    source: impl AsRef<Path>,
) -> String {
    match found {
        Some(language) => {
            debug!(source = %source.as_ref().display(), %language, "detected language header");
            language
        }
        None => {
            debug!(
                source = %source.as_ref().display(),
                language = default_language,
                "no language header, using default"
            );
            default_language.to_string()
        }
    }
}

/// Calls `f` for every line with its terminator still attached.
fn for_each_line<R: BufRead>(mut reader: R, mut f: impl FnMut(&str)) -> Result<(), Error> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).map_err(Error::Io)? == 0 {
            return Ok(());
        }
        f(&line);
    }
}

/// Header pass. The whole input is read and the last `Language:` line wins.
fn scan_language<R: BufRead>(reader: R) -> Result<Option<String>, Error> {
    let mut language = None;
    for_each_line(reader, |line| {
        if let Some(tag) = language_from_header(line) {
            language = Some(tag.to_string());
        }
    })?;
    Ok(language)
}

fn language_from_header(line: &str) -> Option<&str> {
    let rest = trim_line_ending(line.strip_prefix(LANGUAGE_HEADER)?);
    Some(
        rest.strip_suffix("\\n\"")
            .or_else(|| rest.strip_suffix('"'))
            .unwrap_or(rest),
    )
}

/// Body pass.
fn scan_records<R: BufRead>(reader: R) -> Result<Vec<Record>, Error> {
    let mut parser = RecordParser::default();
    for_each_line(reader, |line| parser.feed(line))?;
    Ok(parser.finish())
}

fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Contents of a `"..."` field, without the quotes. `None` if either quote is missing.
fn quoted_value(rest: &str) -> Option<&str> {
    trim_line_ending(rest)
        .trim_start()
        .strip_prefix('"')?
        .strip_suffix('"')
}

/// How a single line is treated by the record parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    MsgId(&'a str),
    MsgStr(&'a str),
    TranslatorComment,
    ExtractedComment,
    Context(&'a str),
    Quoted(&'a str),
    Other,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if !line.is_empty() && line.trim().is_empty() {
            Line::Blank
        } else if let Some(rest) = line.strip_prefix(MSGID) {
            Line::MsgId(rest)
        } else if let Some(rest) = line.strip_prefix(MSGSTR) {
            Line::MsgStr(rest)
        } else if line.starts_with(EXTRACTED_COMMENT) {
            Line::ExtractedComment
        } else if line.starts_with(TRANSLATOR_COMMENT) {
            Line::TranslatorComment
        } else if let Some(rest) = line.strip_prefix(MSGCTXT) {
            Line::Context(rest)
        } else if line.starts_with('"') {
            Line::Quoted(line)
        } else {
            Line::Other
        }
    }
}

/// The field a continuation line appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Text,
    Trans,
}

/// Accumulates one PO block at a time and emits it on a blank line or at
/// end of input.
#[derive(Debug, Default)]
struct RecordParser {
    text: Option<String>,
    entry: TranslationEntry,
    context: Option<String>,
    target: Option<Field>,
    records: Vec<Record>,
}

impl RecordParser {
    fn feed(&mut self, line: &str) {
        match Line::classify(line) {
            Line::Blank => self.finish_record(),
            Line::MsgId(rest) => self.set_field(Field::Text, rest, line),
            Line::MsgStr(rest) => self.set_field(Field::Trans, rest, line),
            Line::TranslatorComment => self
                .entry
                .translator_comment
                .get_or_insert_with(String::new)
                .push_str(line),
            Line::ExtractedComment => self.entry.extracted_comment = Some(line.to_string()),
            Line::Context(rest) => self.context = Some(rest.trim_start().to_string()),
            Line::Quoted(rest) => self.continue_field(rest, line),
            Line::Other => {}
        }
    }

    fn set_field(&mut self, field: Field, rest: &str, line: &str) {
        let Some(value) = quoted_value(rest) else {
            debug!(line = trim_line_ending(line), "ignoring malformed field line");
            return;
        };
        *self.slot(field) = Some(unescape(value));
        self.target = Some(field);
    }

    fn continue_field(&mut self, rest: &str, line: &str) {
        let Some(field) = self.target else {
            return;
        };
        let Some(value) = quoted_value(rest) else {
            debug!(line = trim_line_ending(line), "ignoring malformed continuation line");
            return;
        };
        self.slot(field)
            .get_or_insert_with(String::new)
            .push_str(&unescape(value));
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Text => &mut self.text,
            Field::Trans => &mut self.entry.trans,
        }
    }

    fn finish_record(&mut self) {
        let text = self.text.take();
        let context = self.context.take();
        let entry = std::mem::take(&mut self.entry);
        self.target = None;

        if text.is_none() && entry.is_empty() {
            return;
        }

        // An explicit context takes precedence, even when it is empty.
        match context.or(text) {
            Some(key) if !key.is_empty() => {
                trace!(%key, "finalized record");
                self.records.push(Record { key, entry });
            }
            _ => trace!("discarding record without a key"),
        }
    }

    fn finish(mut self) -> Vec<Record> {
        self.finish_record();
        self.records
    }
}
