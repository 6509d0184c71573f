//! Line-level lexing of APT stanzas.
use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

/// Normalize raw stanza or document text.
///
/// `\r\n` and lone `\r` become `\n`, NUL bytes are removed, the text is
/// brought into Unicode NFC and surrounding whitespace is trimmed. Text that
/// needs none of this is returned borrowed.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(text);

    if text.contains('\r') {
        text = Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"));
    }

    if text.contains('\0') {
        text = Cow::Owned(text.replace('\0', ""));
    }

    if is_nfc_quick(text.chars()) != IsNormalized::Yes {
        text = Cow::Owned(text.nfc().collect());
    }

    match text {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => {
            let trimmed = s.trim();
            if trimmed.len() == s.len() {
                Cow::Owned(s)
            } else {
                Cow::Owned(trimmed.to_string())
            }
        }
    }
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub(crate) fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for word in value.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn field_line() -> &'static Regex {
    static FIELD_LINE: OnceLock<Regex> = OnceLock::new();
    FIELD_LINE.get_or_init(|| Regex::new(r"^(.*?): (.*)$").expect("field line pattern is valid"))
}

/// A classified line of a stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `Key: value`, with the value as written.
    Field { key: &'a str, value: &'a str },

    /// `Key:` with nothing after the colon; opens a multi-line block.
    Header(&'a str),

    /// A continuation line consisting of a single `.`.
    Blank,

    /// Any other line, right-trimmed.
    Continuation(&'a str),
}

/// Classify a single non-empty line.
///
/// Every line is matched against the field pattern first, indented or not,
/// so a description line such as ` Note: foo` opens a field named ` Note`.
pub(crate) fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if let Some(captures) = field_line().captures(line) {
        let key = captures.get(1).map_or("", |m| m.as_str());
        let value = captures.get(2).map_or("", |m| m.as_str());
        if !key.is_empty() && !value.trim().is_empty() {
            return Line::Field { key, value };
        }
    }

    if let Some(key) = trimmed.strip_suffix(':') {
        return Line::Header(key);
    }

    if trimmed == "." {
        Line::Blank
    } else {
        Line::Continuation(line.trim_end())
    }
}
