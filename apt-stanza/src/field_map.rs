//! Case-insensitive, insertion-ordered field storage.
use std::borrow::Cow;

use indexmap::IndexMap;

use crate::Error;

/// A field in an APT stanza.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Field {
    /// The name of the field, as it was first written.
    pub name: String,

    /// The value of the field.
    pub value: String,
}

/// The fields of a single stanza.
///
/// Lookups ignore case, while iteration yields every key with the casing it
/// was inserted with. The first insertion of a key wins; later insertions of
/// any case variant of it are ignored.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    // Keyed by the lowercased field name.
    fields: IndexMap<String, Field>,
}

fn fold(key: &str) -> Cow<'_, str> {
    if key.bytes().any(|b| b.is_ascii_uppercase() || !b.is_ascii()) {
        Cow::Owned(key.to_lowercase())
    } else {
        Cow::Borrowed(key)
    }
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field unless a field with the same name (ignoring case) exists.
    ///
    /// Returns `true` if the field was inserted.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        self.insert_new(key, value.to_string()).is_some()
    }

    /// Insert a new field, returning its position, or `None` if it already exists.
    pub(crate) fn insert_new(&mut self, key: &str, value: String) -> Option<usize> {
        match self.fields.entry(fold(key).into_owned()) {
            indexmap::map::Entry::Occupied(_) => None,
            indexmap::map::Entry::Vacant(entry) => {
                let index = entry.index();
                entry.insert(Field {
                    name: key.to_string(),
                    value,
                });
                Some(index)
            }
        }
    }

    /// Mutable access to the value at the given position.
    pub(crate) fn value_at_mut(&mut self, index: usize) -> Option<&mut String> {
        self.fields
            .get_index_mut(index)
            .map(|(_, field)| &mut field.value)
    }

    /// Get the value of a field by name, ignoring case.
    ///
    /// Returns `None` if the field does not exist.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_field(key).map(|field| field.value.as_str())
    }

    /// Get a field by name, ignoring case.
    pub fn get_field(&self, key: &str) -> Option<&Field> {
        self.fields.get(fold(key).as_ref())
    }

    /// The name of a field with its original casing.
    pub fn key(&self, key: &str) -> Option<&str> {
        self.get_field(key).map(|field| field.name.as_str())
    }

    /// Check whether a field exists, ignoring case.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(fold(key).as_ref())
    }

    /// Return the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Return the number of fields.
    pub fn field_count(&self) -> usize {
        self.len()
    }

    /// Check if the map has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.fields
            .values()
            .map(|field| (field.name.as_str(), field.value.as_str()))
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    ///
    /// Each call starts a fresh iteration.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.iter()
    }

    /// Iterate over field names with their original casing.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.values().map(|field| field.name.as_str())
    }

    /// Check that all of the given fields are present.
    ///
    /// Fails with the first missing field, in the order given.
    pub fn require(&self, keys: &[&str]) -> Result<(), Error> {
        match keys.iter().find(|key| !self.contains_key(key)) {
            Some(key) => Err(Error::MissingRequiredField(key.to_string())),
            None => Ok(()),
        }
    }
}

impl PartialEq for FieldMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for FieldMap {}

impl FromIterator<(String, String)> for FieldMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut fields = FieldMap::new();
        for (name, value) in iter {
            fields.insert_new(&name, value);
        }
        fields
    }
}

impl From<Vec<(String, String)>> for FieldMap {
    fn from(fields: Vec<(String, String)>) -> Self {
        fields.into_iter().collect()
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, String);
    type IntoIter =
        std::iter::Map<indexmap::map::IntoValues<String, Field>, fn(Field) -> (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields
            .into_values()
            .map(|field| (field.name, field.value))
    }
}

impl std::str::FromStr for FieldMap {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(crate::parse_field_map(s))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
