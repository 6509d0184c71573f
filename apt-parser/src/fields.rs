//! Field value types and the transforms that produce them.
use apt_stanza::FieldMap;
use chrono::{DateTime, FixedOffset};

/// Value of the `Priority` field, ordered from most to least important.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Priority {
    /// Needed for the system to function
    Required,

    /// Expected on any Unix-like system
    Important,

    /// Part of a reasonably small default install
    Standard,

    /// The usual priority for most packages
    Optional,

    /// Deprecated alias of `optional`
    Extra,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Priority::Required => "required",
            Priority::Important => "important",
            Priority::Standard => "standard",
            Priority::Optional => "optional",
            Priority::Extra => "extra",
        })
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let priority = match s {
            "required" => Priority::Required,
            "important" => Priority::Important,
            "standard" => Priority::Standard,
            "optional" => Priority::Optional,
            "extra" => Priority::Extra,
            _ => return Err(format!("unknown priority: {}", s)),
        };
        Ok(priority)
    }
}

/// Kind of binary package
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum PackageType {
    /// A regular binary package
    Deb,

    /// A micro package for the installer
    Udeb,
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            PackageType::Deb => "deb",
            PackageType::Udeb => "udeb",
        })
    }
}

impl std::str::FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deb" => Ok(PackageType::Deb),
            "udeb" => Ok(PackageType::Udeb),
            _ => Err(format!("unknown package type: {}", s)),
        }
    }
}

/// Value of the `Multi-Arch` field
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum MultiArch {
    /// One copy per architecture may be installed side by side
    Same,
    /// Satisfies dependencies from any architecture
    Foreign,
    /// Only satisfies dependencies from its own architecture
    No,
    /// Satisfies `pkg:any` dependencies from any architecture
    Allowed,
}

impl MultiArch {
    fn as_str(self) -> &'static str {
        match self {
            MultiArch::Same => "same",
            MultiArch::Foreign => "foreign",
            MultiArch::No => "no",
            MultiArch::Allowed => "allowed",
        }
    }
}

impl std::str::FromStr for MultiArch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            MultiArch::Same,
            MultiArch::Foreign,
            MultiArch::No,
            MultiArch::Allowed,
        ]
        .into_iter()
        .find(|arch| arch.as_str() == s)
        .ok_or_else(|| format!("unknown Multi-Arch value: {}", s))
    }
}

impl std::fmt::Display for MultiArch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file listed in a checksum field.
///
/// The digest algorithm is given by the field the record was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HashRecord {
    /// Path of the file, relative to the directory of the Release file
    pub filename: String,

    /// Hex digest of the file
    pub hash: String,

    /// Size of the file, in bytes
    pub size: u64,
}

impl std::fmt::Display for HashRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} {}", self.hash, self.size, self.filename)
    }
}

/// The checksum fields of a Release file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashField {
    /// `MD5Sum`
    Md5Sum,
    /// `SHA1`
    Sha1,
    /// `SHA256`
    Sha256,
    /// `SHA512`
    Sha512,
}

impl HashField {
    /// All checksum fields.
    pub const ALL: [HashField; 4] = [
        HashField::Md5Sum,
        HashField::Sha1,
        HashField::Sha256,
        HashField::Sha512,
    ];

    /// The name of the field in a Release file.
    pub fn field_name(self) -> &'static str {
        match self {
            HashField::Md5Sum => "MD5Sum",
            HashField::Sha1 => "SHA1",
            HashField::Sha256 => "SHA256",
            HashField::Sha512 => "SHA512",
        }
    }
}

impl std::fmt::Display for HashField {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Decode a checksum field value into its file records.
///
/// The value is a flat sequence of `<digest> <size> <filename>` groups, each
/// of which normally yields one record. A trailing group with fewer than
/// three tokens is dropped. A complete group whose size is not a decimal
/// number is dropped as well, so the result can hold fewer records than
/// there are groups.
pub fn parse_hash_records(value: &str) -> Vec<HashRecord> {
    let tokens: Vec<&str> = value.split_whitespace().collect();

    tokens
        .chunks_exact(3)
        .filter_map(|group| match group[1].parse::<u64>() {
            Ok(size) => Some(HashRecord {
                filename: group[2].to_string(),
                hash: group[0].to_string(),
                size,
            }),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(file = group[2], size = group[1], "dropping checksum with invalid size: {}", _e);
                None
            }
        })
        .collect()
}

/// Decode one of the checksum fields of `fields`.
///
/// Returns `None` if the field is not present.
pub fn decode_hash_list(fields: &FieldMap, field: HashField) -> Option<Vec<HashRecord>> {
    fields.get(field.field_name()).map(parse_hash_records)
}

pub(crate) fn deserialize_hash_list(value: &str) -> Result<Vec<HashRecord>, String> {
    Ok(parse_hash_records(value))
}

pub(crate) fn deserialize_yesno(s: &str) -> Result<bool, String> {
    match s {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err(format!("invalid value for yesno: {}", s)),
    }
}

/// Relationship fields are separated by a comma and a single space.
pub(crate) fn deserialize_relations(value: &str) -> Result<Vec<String>, String> {
    Ok(value.split(", ").map(|s| s.to_string()).collect())
}

pub(crate) fn deserialize_whitespace_list(value: &str) -> Result<Vec<String>, String> {
    Ok(value.split_whitespace().map(|s| s.to_string()).collect())
}

/// Entries are split on bare commas, then trimmed; empty entries are left out.
pub(crate) fn deserialize_comma_list(value: &str) -> Result<Vec<String>, String> {
    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect())
}

/// A zero installed size carries no information and is treated as absent.
pub(crate) fn deserialize_installed_size(value: &str) -> Result<u64, String> {
    match value.parse::<u64>() {
        Ok(0) => Err("installed size is zero".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse an RFC 2822 date, as used by the `Date` and `Valid-Until` fields.
///
/// Archives commonly write the zone as `UTC`, which is read as `+0000`.
pub fn parse_date(value: &str) -> Result<DateTime<FixedOffset>, String> {
    match DateTime::parse_from_rfc2822(value) {
        Ok(date) => Ok(date),
        Err(e) => match value.strip_suffix("UTC") {
            Some(rest) => DateTime::parse_from_rfc2822(&format!("{}+0000", rest))
                .map_err(|_| e.to_string()),
            None => Err(e.to_string()),
        },
    }
}
