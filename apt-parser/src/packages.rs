//! `Packages` indices.
use crate::control::ControlRecord;
use crate::options::{ErrorPolicy, Options};
use crate::record::Fields;
use apt_stanza::{Error, FieldMap, FromStanza};

#[derive(Debug, Clone, PartialEq, Eq, FromStanza)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// An entry of a `Packages` index
pub struct PackageRecord {
    #[stanza(field = "Filename")]
    /// Path of the package, relative to the archive root
    pub filename: String,

    #[stanza(field = "Size", lenient)]
    /// Size of the package, in bytes
    pub size: u64,

    #[stanza(field = "MD5sum")]
    /// MD5 digest of the package
    pub md5: Option<String>,

    #[stanza(field = "SHA1")]
    /// SHA1 digest of the package
    pub sha1: Option<String>,

    #[stanza(field = "SHA256")]
    /// SHA256 digest of the package
    pub sha256: Option<String>,

    #[stanza(field = "SHA512")]
    /// SHA512 digest of the package
    pub sha512: Option<String>,

    #[stanza(field = "Description-md5")]
    /// MD5 digest of the untranslated description
    pub description_md5: Option<String>,

    #[stanza(flatten)]
    #[cfg_attr(feature = "serde", serde(flatten))]
    /// The control attributes of the package
    pub control: ControlRecord,
}

impl std::ops::Deref for PackageRecord {
    type Target = ControlRecord;

    fn deref(&self) -> &ControlRecord {
        &self.control
    }
}

impl Fields for PackageRecord {
    fn fields(&self) -> &FieldMap {
        &self.control.fields
    }
}

impl std::str::FromStr for PackageRecord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, apt_stanza::Validation::Strict)
    }
}

/// The packages of a `Packages` index, in the order they appear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packages {
    packages: Vec<PackageRecord>,
    skipped: Vec<Error>,
}

impl Packages {
    /// Parse a `Packages` index.
    ///
    /// With [`ErrorPolicy::Abort`] the error of the first failing stanza is
    /// returned. With [`ErrorPolicy::Skip`] failing stanzas are left out and
    /// their errors are available from [`Packages::skipped`].
    pub fn parse(text: &str, options: &Options) -> Result<Self, Error> {
        let stanzas = apt_stanza::split_stanzas(text);
        let results = build_all(&stanzas, options);

        let mut packages = Vec::with_capacity(results.len());
        let mut skipped = vec![];
        for result in results {
            match result {
                Ok(package) => packages.push(package),
                Err(e) if options.on_error == ErrorPolicy::Skip => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("skipping package stanza: {}", e);
                    skipped.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Self { packages, skipped })
    }

    /// Number of packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Check if there are no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Get a package by position.
    pub fn get(&self, index: usize) -> Option<&PackageRecord> {
        self.packages.get(index)
    }

    /// Iterate over the packages.
    pub fn iter(&self) -> std::slice::Iter<'_, PackageRecord> {
        self.packages.iter()
    }

    /// Errors of the stanzas that were left out.
    pub fn skipped(&self) -> &[Error] {
        &self.skipped
    }
}

fn build(index: usize, stanza: &str, options: &Options) -> Result<PackageRecord, Error> {
    PackageRecord::from_text(stanza, options.validation).map_err(|e| e.in_stanza(index))
}

#[cfg(feature = "parallel")]
fn build_all(stanzas: &[String], options: &Options) -> Vec<Result<PackageRecord, Error>> {
    use rayon::prelude::*;

    let mut out = Vec::with_capacity(stanzas.len());
    stanzas
        .par_iter()
        .enumerate()
        .map(|(i, stanza)| build(i, stanza, options))
        .collect_into_vec(&mut out);
    out
}

#[cfg(not(feature = "parallel"))]
fn build_all(stanzas: &[String], options: &Options) -> Vec<Result<PackageRecord, Error>> {
    stanzas
        .iter()
        .enumerate()
        .map(|(i, stanza)| build(i, stanza, options))
        .collect()
}

impl From<Packages> for Vec<PackageRecord> {
    fn from(packages: Packages) -> Self {
        packages.packages
    }
}

impl std::ops::Index<usize> for Packages {
    type Output = PackageRecord;

    fn index(&self, index: usize) -> &PackageRecord {
        &self.packages[index]
    }
}

impl IntoIterator for Packages {
    type Item = PackageRecord;
    type IntoIter = std::vec::IntoIter<PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Packages {
    type Item = &'a PackageRecord;
    type IntoIter = std::slice::Iter<'a, PackageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

impl std::str::FromStr for Packages {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &Options::strict())
    }
}
