//! Runtime parsing options.
use apt_stanza::Validation;

/// What to do when a stanza of a multi-stanza document fails to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    /// Fail the whole document with the first error.
    #[default]
    Abort,

    /// Leave the stanza out and keep its error.
    Skip,
}

/// Options controlling how records are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Options {
    /// How strictly each record is checked.
    pub validation: Validation,

    /// How failing stanzas of a `Packages` index are handled.
    pub on_error: ErrorPolicy,
}

impl Options {
    /// Strict validation; the first failing stanza aborts the parse.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient validation; failing stanzas are skipped.
    pub fn lenient() -> Self {
        Self {
            validation: Validation::Lenient,
            on_error: ErrorPolicy::Skip,
        }
    }

    /// Set the validation mode.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }
}
