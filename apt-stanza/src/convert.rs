//! Projection of field maps onto typed Rust records.
use crate::{Error, FieldMap};

/// How strictly a record is checked while it is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Validation {
    /// Missing required fields and unparsable values are errors.
    #[default]
    Strict,

    /// Missing required fields take their default value and unparsable
    /// values are treated as absent.
    Lenient,
}

impl Validation {
    /// Whether this is [`Validation::Strict`].
    pub fn is_strict(self) -> bool {
        self == Validation::Strict
    }
}

/// Build a typed record from the fields of one stanza.
///
/// This is usually derived with `#[derive(FromStanza)]` (behind the `derive`
/// feature).
pub trait FromStanza: Sized {
    /// Names of the fields that must be present, in the order they are checked.
    fn required_fields() -> Vec<&'static str>;

    /// Populate the record from `fields` without checking required fields first.
    fn project(fields: FieldMap, validation: Validation) -> Result<Self, Error>;

    /// Check required fields (in strict mode), then populate the record.
    fn from_field_map(fields: FieldMap, validation: Validation) -> Result<Self, Error> {
        if validation.is_strict() {
            fields.require(&Self::required_fields())?;
        }
        Self::project(fields, validation)
    }

    /// Tokenize a single stanza and build the record from it.
    fn from_text(text: &str, validation: Validation) -> Result<Self, Error> {
        Self::from_field_map(crate::parse_field_map(text), validation)
    }
}

fn degrade(key: &str, value: &str, reason: &dyn std::fmt::Display) {
    #[cfg(feature = "tracing")]
    tracing::debug!(field = key, value, %reason, "ignoring unparsable field value");
    #[cfg(not(feature = "tracing"))]
    let _ = (key, value, reason);
}

/// Read a required field.
///
/// `lenient` fields fall back to `T::default()` when their value does not
/// parse, whatever the validation mode.
pub fn required_value<T, E, F>(
    fields: &FieldMap,
    key: &str,
    validation: Validation,
    lenient: bool,
    parse: F,
) -> Result<T, Error>
where
    T: Default,
    E: std::fmt::Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    let value = match fields.get(key) {
        Some(value) => value.trim(),
        None if validation.is_strict() => {
            return Err(Error::MissingRequiredField(key.to_string()));
        }
        None => return Ok(T::default()),
    };

    match parse(value) {
        Ok(v) => Ok(v),
        Err(e) if lenient || !validation.is_strict() => {
            degrade(key, value, &e);
            Ok(T::default())
        }
        Err(e) => Err(Error::InvalidField {
            field: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Read an optional field.
///
/// A missing field is `None`. `lenient` fields are also `None` when their
/// value does not parse, whatever the validation mode.
pub fn optional_value<T, E, F>(
    fields: &FieldMap,
    key: &str,
    validation: Validation,
    lenient: bool,
    parse: F,
) -> Result<Option<T>, Error>
where
    E: std::fmt::Display,
    F: FnOnce(&str) -> Result<T, E>,
{
    let Some(value) = fields.get(key).map(str::trim) else {
        return Ok(None);
    };

    match parse(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) if lenient || !validation.is_strict() => {
            degrade(key, value, &e);
            Ok(None)
        }
        Err(e) => Err(Error::InvalidField {
            field: key.to_string(),
            reason: e.to_string(),
        }),
    }
}
