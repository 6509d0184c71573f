//! Binary package control records.
use crate::fields::{
    deserialize_installed_size, deserialize_relations, deserialize_yesno, MultiArch, PackageType,
    Priority,
};
use crate::record::Fields;
use apt_stanza::{FieldMap, FromStanza};

#[derive(Debug, Clone, PartialEq, Eq, FromStanza)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
/// The control file of a binary package
pub struct ControlRecord {
    #[stanza(field = "Package")]
    /// Name of the package
    pub package: String,

    #[stanza(field = "Source")]
    /// Source package the binary was built from
    pub source: Option<String>,

    #[stanza(field = "Version")]
    /// Version of the package
    pub version: String,

    #[stanza(field = "Section")]
    /// Section of the package
    pub section: Option<String>,

    #[stanza(field = "Priority", lenient)]
    /// Priority of the package
    pub priority: Option<Priority>,

    #[stanza(field = "Architecture")]
    /// Architecture the package was built for
    pub architecture: String,

    #[stanza(field = "Essential", deserialize_with = deserialize_yesno, lenient)]
    /// Whether the package is essential
    pub essential: Option<bool>,

    #[stanza(field = "Depends", deserialize_with = deserialize_relations)]
    /// Dependencies
    pub depends: Option<Vec<String>>,

    #[stanza(field = "Pre-Depends", deserialize_with = deserialize_relations)]
    /// Dependencies that must be configured before unpacking
    pub pre_depends: Option<Vec<String>>,

    #[stanza(field = "Recommends", deserialize_with = deserialize_relations)]
    /// Recommended packages
    pub recommends: Option<Vec<String>>,

    #[stanza(field = "Suggests", deserialize_with = deserialize_relations)]
    /// Suggested packages
    pub suggests: Option<Vec<String>>,

    #[stanza(field = "Replaces", deserialize_with = deserialize_relations)]
    /// Packages replaced by this one
    pub replaces: Option<Vec<String>>,

    #[stanza(field = "Enhances", deserialize_with = deserialize_relations)]
    /// Packages enhanced by this one
    pub enhances: Option<Vec<String>>,

    #[stanza(field = "Breaks", deserialize_with = deserialize_relations)]
    /// Packages broken by this one
    pub breaks: Option<Vec<String>>,

    #[stanza(field = "Conflicts", deserialize_with = deserialize_relations)]
    /// Conflicting packages
    pub conflicts: Option<Vec<String>>,

    #[stanza(field = "Provides", deserialize_with = deserialize_relations)]
    /// Virtual packages provided by this one
    pub provides: Option<Vec<String>>,

    #[stanza(field = "Installed-Size", deserialize_with = deserialize_installed_size, lenient)]
    /// Installed size, in kibibytes
    pub installed_size: Option<u64>,

    #[stanza(field = "Maintainer")]
    /// Maintainer of the package
    pub maintainer: String,

    #[stanza(field = "Description")]
    /// Description of the package
    pub description: String,

    #[stanza(field = "Homepage")]
    /// Upstream homepage
    pub homepage: Option<String>,

    #[stanza(field = "Built-Using", deserialize_with = deserialize_relations)]
    /// Source packages whose code was built into this one
    pub built_using: Option<Vec<String>>,

    #[stanza(field = "Package-Type", lenient)]
    /// Kind of binary package
    pub package_type: Option<PackageType>,

    #[stanza(field = "Multi-Arch", lenient)]
    /// Multi-Arch behaviour
    pub multi_arch: Option<MultiArch>,

    #[stanza(fields)]
    /// All fields of the stanza
    pub fields: FieldMap,
}

impl Fields for ControlRecord {
    fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

impl std::str::FromStr for ControlRecord {
    type Err = apt_stanza::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s, apt_stanza::Validation::Strict)
    }
}
