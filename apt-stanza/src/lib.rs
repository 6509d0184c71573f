//! Lenient parser for APT control-style stanzas.
//!
//! `Release` files, `Packages` indices and binary `control` files all use the
//! same format: stanzas of `Key: value` lines, separated by blank lines, where
//! indented lines continue the value of the preceding field.
//!
//! Parsing never fails. Orphaned continuation lines are dropped, a field that
//! appears twice keeps its first value, and field names are looked up without
//! regard to case.
//!
//! ```rust
//! let fields = apt_stanza::parse_field_map(
//!     "Package: hello\nMaintainer: Jane Doe <jane@example.com>\nDescription: greeter\n friendly\n",
//! );
//! assert_eq!(fields.get("MAINTAINER"), Some("Jane Doe <jane@example.com>"));
//! assert_eq!(fields.get("description"), Some("greeter friendly"));
//! ```
//!
//! Typed records are built on top of this with the [`FromStanza`] trait.

#[cfg(feature = "derive")]
pub use apt_stanza_derive::FromStanza;

pub mod convert;
pub use convert::{FromStanza, Validation};
pub mod field_map;
pub use field_map::{Field, FieldMap};
mod lex;
pub use lex::normalize;

use lex::Line;

/// Error type for building typed records.
///
/// Tokenizing and splitting never fail; only projection onto a record does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required field is absent.
    MissingRequiredField(String),

    /// A field value could not be interpreted.
    InvalidField {
        /// Name of the field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A stanza of a multi-stanza document failed to build.
    Stanza {
        /// Position of the stanza in the document, starting at zero.
        index: usize,
        /// The underlying error.
        error: Box<Error>,
    },
}

impl Error {
    /// Attach the position of the failing stanza.
    pub fn in_stanza(self, index: usize) -> Self {
        Self::Stanza {
            index,
            error: Box::new(self),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::MissingRequiredField(field) => write!(f, "Missing required field: {}", field),
            Self::InvalidField { field, reason } => {
                write!(f, "Invalid value for field {}: {}", field, reason)
            }
            Self::Stanza { index, error } => write!(f, "Stanza {}: {}", index, error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stanza { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// Tokenize the text of a single stanza into a [`FieldMap`].
///
/// Continuation lines are joined onto the current field with runs of
/// whitespace collapsed to a single space; a continuation line of just `.`
/// appends a newline instead. A line naming a field that was already seen is
/// dropped, and the lines following it keep extending the current field.
/// Lines that do not belong to any field are ignored.
pub fn parse_field_map(text: &str) -> FieldMap {
    let text = normalize(text);
    let mut fields = FieldMap::new();
    let mut current: Option<usize> = None;

    for line in text.split('\n').filter(|line| !line.is_empty()) {
        match lex::classify(line) {
            Line::Field { key, value } => match fields.insert_new(key, value.to_string()) {
                Some(index) => current = Some(index),
                None => discard_duplicate(key),
            },
            Line::Header(key) if key.is_empty() => {
                current = None;
            }
            Line::Header(key) => match fields.insert_new(key, String::new()) {
                Some(index) => current = Some(index),
                None => discard_duplicate(key),
            },
            Line::Blank => match current.and_then(|i| fields.value_at_mut(i)) {
                Some(value) => value.push('\n'),
                None => drop_orphan(line),
            },
            Line::Continuation(rest) => match current.and_then(|i| fields.value_at_mut(i)) {
                Some(value) => {
                    value.push_str(rest);
                    *value = lex::collapse_whitespace(value);
                }
                None => drop_orphan(line),
            },
        }
    }

    fields
}

fn discard_duplicate(key: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(field = key, "discarding duplicate field");
    #[cfg(not(feature = "tracing"))]
    let _ = key;
}

fn drop_orphan(line: &str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(line, "dropping line outside of any field");
    #[cfg(not(feature = "tracing"))]
    let _ = line;
}

/// Split a multi-stanza document into the text of its stanzas.
///
/// Stanzas are separated by an empty line. Each stanza is trimmed, and
/// stanzas that are empty after trimming are left out.
pub fn split_stanzas(text: &str) -> Vec<String> {
    normalize(text)
        .split("\n\n")
        .map(str::trim)
        .filter(|stanza| !stanza.is_empty())
        .map(String::from)
        .collect()
}

/// Split a document and tokenize every stanza, preserving their order.
///
/// With the `parallel` feature the stanzas are tokenized on the rayon thread
/// pool.
pub fn parse_stanzas(text: &str) -> Vec<FieldMap> {
    let stanzas = split_stanzas(text);
    tokenize_all(&stanzas)
}

#[cfg(feature = "parallel")]
fn tokenize_all(stanzas: &[String]) -> Vec<FieldMap> {
    use rayon::prelude::*;

    let mut out = Vec::with_capacity(stanzas.len());
    stanzas
        .par_iter()
        .map(|stanza| parse_field_map(stanza))
        .collect_into_vec(&mut out);
    out
}

#[cfg(not(feature = "parallel"))]
fn tokenize_all(stanzas: &[String]) -> Vec<FieldMap> {
    stanzas.iter().map(|stanza| parse_field_map(stanza)).collect()
}

/// A multi-stanza document, such as a `Packages` index.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Document(Vec<FieldMap>);

impl Document {
    /// Number of stanzas in the document.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the document has no stanzas.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a stanza by position.
    pub fn get(&self, index: usize) -> Option<&FieldMap> {
        self.0.get(index)
    }

    /// Iterate over the stanzas in the document.
    pub fn iter(&self) -> impl Iterator<Item = &FieldMap> {
        self.0.iter()
    }
}

impl From<Document> for Vec<FieldMap> {
    fn from(doc: Document) -> Self {
        doc.0
    }
}

impl From<Vec<FieldMap>> for Document {
    fn from(stanzas: Vec<FieldMap>) -> Self {
        Document(stanzas)
    }
}

impl IntoIterator for Document {
    type Item = FieldMap;
    type IntoIter = std::vec::IntoIter<FieldMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::ops::Index<usize> for Document {
    type Output = FieldMap;

    fn index(&self, index: usize) -> &FieldMap {
        &self.0[index]
    }
}

impl std::str::FromStr for Document {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Document(parse_stanzas(s)))
    }
}
