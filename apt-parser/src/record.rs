//! Records and the field access they share.
use crate::control::ControlRecord;
use crate::packages::PackageRecord;
use crate::release::ReleaseRecord;
use apt_stanza::FieldMap;

/// Access to the raw fields a record was built from.
pub trait Fields {
    /// The fields of the stanza.
    fn fields(&self) -> &FieldMap;

    /// Get the value of a field by name, ignoring case.
    fn get(&self, key: &str) -> Option<&str> {
        self.fields().get(key)
    }

    /// Number of fields in the stanza.
    fn field_count(&self) -> usize {
        self.fields().len()
    }
}

/// A stanza with no typed attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenericRecord {
    /// All fields of the stanza
    pub fields: FieldMap,
}

impl Fields for GenericRecord {
    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

impl From<FieldMap> for GenericRecord {
    fn from(fields: FieldMap) -> Self {
        Self { fields }
    }
}

impl std::str::FromStr for GenericRecord {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(apt_stanza::parse_field_map(s).into())
    }
}

/// Any of the record kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Record {
    /// A stanza with no typed attributes
    Generic(GenericRecord),

    /// A binary package control file
    Control(ControlRecord),

    /// An entry of a `Packages` index
    Package(PackageRecord),

    /// A `Release` file
    Release(ReleaseRecord),
}

impl Record {
    /// The control attributes, for control and package records.
    pub fn as_control(&self) -> Option<&ControlRecord> {
        match self {
            Record::Control(control) => Some(control),
            Record::Package(package) => Some(&package.control),
            _ => None,
        }
    }

    /// The package record, if this is one.
    pub fn as_package(&self) -> Option<&PackageRecord> {
        match self {
            Record::Package(package) => Some(package),
            _ => None,
        }
    }

    /// The release record, if this is one.
    pub fn as_release(&self) -> Option<&ReleaseRecord> {
        match self {
            Record::Release(release) => Some(release),
            _ => None,
        }
    }
}

impl Fields for Record {
    fn fields(&self) -> &FieldMap {
        match self {
            Record::Generic(record) => record.fields(),
            Record::Control(record) => record.fields(),
            Record::Package(record) => record.fields(),
            Record::Release(record) => record.fields(),
        }
    }
}

impl From<GenericRecord> for Record {
    fn from(record: GenericRecord) -> Self {
        Record::Generic(record)
    }
}

impl From<ControlRecord> for Record {
    fn from(record: ControlRecord) -> Self {
        Record::Control(record)
    }
}

impl From<PackageRecord> for Record {
    fn from(record: PackageRecord) -> Self {
        Record::Package(record)
    }
}

impl From<ReleaseRecord> for Record {
    fn from(record: ReleaseRecord) -> Self {
        Record::Release(record)
    }
}
