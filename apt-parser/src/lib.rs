#![deny(missing_docs)]
//! Typed parsing of APT repository metadata.
//!
//! This crate builds typed records from the three stanza formats APT deals
//! with: `Release` files, `Packages` indices and binary package `control`
//! files. The underlying field maps stay available from every record through
//! the [`Fields`] trait.
//!
//! ```rust
//! use apt_parser::Fields;
//!
//! let release = apt_parser::parse_release(
//!     "Origin: Debian\nSuite: stable\nSHA256:\n abc 12 main/binary-amd64/Packages\n",
//! )
//! .unwrap();
//! assert_eq!(release.suite.as_deref(), Some("stable"));
//! assert_eq!(release.get("ORIGIN"), Some("Debian"));
//! assert_eq!(release.sha256.unwrap()[0].size, 12);
//! ```
//!
//! Records are checked strictly by default: a missing required field or an
//! unparsable value is an error. [`Options::lenient`] relaxes this.

pub use apt_stanza::{parse_field_map, parse_stanzas, split_stanzas};
pub use apt_stanza::{Document, Error, Field, FieldMap, FromStanza, Validation};

pub mod control;
pub use control::ControlRecord;
pub mod fields;
pub use fields::{
    decode_hash_list, parse_hash_records, HashField, HashRecord, MultiArch, PackageType, Priority,
};
mod options;
pub use options::{ErrorPolicy, Options};
pub mod packages;
pub use packages::{PackageRecord, Packages};
pub mod record;
pub use record::{Fields, GenericRecord, Record};
pub mod release;
pub use release::ReleaseRecord;

/// Parse a binary package control file.
pub fn parse_control(text: &str) -> Result<ControlRecord, Error> {
    parse_control_with(text, &Options::strict())
}

/// Parse a binary package control file with the given options.
pub fn parse_control_with(text: &str, options: &Options) -> Result<ControlRecord, Error> {
    ControlRecord::from_text(text, options.validation)
}

/// Parse a `Release` file.
pub fn parse_release(text: &str) -> Result<ReleaseRecord, Error> {
    parse_release_with(text, &Options::strict())
}

/// Parse a `Release` file with the given options.
pub fn parse_release_with(text: &str, options: &Options) -> Result<ReleaseRecord, Error> {
    ReleaseRecord::from_text(text, options.validation)
}

/// Parse a single entry of a `Packages` index.
pub fn parse_package(text: &str) -> Result<PackageRecord, Error> {
    PackageRecord::from_text(text, Validation::Strict)
}

/// Parse a whole `Packages` index.
pub fn parse_package_list(text: &str) -> Result<Packages, Error> {
    parse_package_list_with(text, &Options::strict())
}

/// Parse a whole `Packages` index with the given options.
pub fn parse_package_list_with(text: &str, options: &Options) -> Result<Packages, Error> {
    Packages::parse(text, options)
}
