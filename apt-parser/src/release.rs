//! `Release` files.
use crate::fields::{
    deserialize_comma_list, deserialize_hash_list, deserialize_whitespace_list, deserialize_yesno,
    parse_date, HashField, HashRecord,
};
use crate::record::Fields;
use apt_stanza::{FieldMap, FromStanza};
use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, PartialEq, Eq, FromStanza)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// A Release file
pub struct ReleaseRecord {
    #[stanza(field = "Architectures", deserialize_with = deserialize_whitespace_list)]
    /// Architectures supported by the release
    pub architectures: Option<Vec<String>>,

    #[stanza(field = "No-Support-for-Architecture-all", deserialize_with = deserialize_yesno, lenient)]
    /// Whether architecture `all` packages are only listed in the
    /// architecture-specific indices
    pub no_support_for_architecture_all: Option<bool>,

    #[stanza(field = "Description")]
    /// Description of the release
    pub description: Option<String>,

    #[stanza(field = "Origin")]
    /// Origin of the release
    pub origin: Option<String>,

    #[stanza(field = "Label")]
    /// Label of the release
    pub label: Option<String>,

    #[stanza(field = "Suite")]
    /// Suite of the release
    pub suite: Option<String>,

    #[stanza(field = "Codename")]
    /// The codename of the release
    pub codename: Option<String>,

    #[stanza(field = "Version")]
    /// Version of the release
    pub version: Option<String>,

    #[stanza(field = "Date", deserialize_with = parse_date)]
    /// Date the release was published
    pub date: Option<DateTime<FixedOffset>>,

    #[stanza(field = "Valid-Until", deserialize_with = parse_date)]
    /// Date after which the release is considered stale
    pub valid_until: Option<DateTime<FixedOffset>>,

    #[stanza(field = "Components", deserialize_with = deserialize_whitespace_list)]
    /// Components supported by the release
    pub components: Option<Vec<String>>,

    #[stanza(field = "NotAutomatic", deserialize_with = deserialize_yesno, lenient)]
    /// Whether packages are only installed when explicitly requested
    pub not_automatic: Option<bool>,

    #[stanza(field = "ButAutomaticUpgrades", deserialize_with = deserialize_yesno, lenient)]
    /// Indicates if packages retrieved from this release should be automatically upgraded
    pub but_automatic_upgrades: Option<bool>,

    #[stanza(field = "Acquire-By-Hash", deserialize_with = deserialize_yesno, lenient)]
    /// Whether index files can be acquired by hash
    pub acquire_by_hash: Option<bool>,

    #[stanza(field = "Signed-By", deserialize_with = deserialize_comma_list)]
    /// Fingerprints of the keys allowed to sign the release
    pub signed_by: Option<Vec<String>>,

    #[stanza(field = "Packages-Require-Authorization", deserialize_with = deserialize_yesno, lenient)]
    /// Whether downloading packages requires authorization
    pub packages_require_authorization: Option<bool>,

    #[stanza(field = "Changelogs")]
    /// URL template for package changelogs
    pub changelogs: Option<String>,

    #[stanza(field = "MD5Sum", deserialize_with = deserialize_hash_list)]
    /// MD5 digests of the index files
    pub md5: Option<Vec<HashRecord>>,

    #[stanza(field = "SHA1", deserialize_with = deserialize_hash_list)]
    /// SHA1 digests of the index files
    pub sha1: Option<Vec<HashRecord>>,

    #[stanza(field = "SHA256", deserialize_with = deserialize_hash_list)]
    /// SHA256 digests of the index files
    pub sha256: Option<Vec<HashRecord>>,

    #[stanza(field = "SHA512", deserialize_with = deserialize_hash_list)]
    /// SHA512 digests of the index files
    pub sha512: Option<Vec<HashRecord>>,

    #[stanza(fields)]
    /// All fields of the stanza
    pub fields: FieldMap,
}

impl ReleaseRecord {
    /// The file list of one of the checksum fields.
    pub fn hashes(&self, field: HashField) -> Option<&[HashRecord]> {
        match field {
            HashField::Md5Sum => self.md5.as_deref(),
            HashField::Sha1 => self.sha1.as_deref(),
            HashField::Sha256 => self.sha256.as_deref(),
            HashField::Sha512 => self.sha512.as_deref(),
        }
    }
}

impl Fields for ReleaseRecord {
    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

impl std::str::FromStr for ReleaseRecord {
    type Err = apt_stanza::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, apt_stanza::Validation::Strict)
    }
}
