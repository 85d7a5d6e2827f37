//! Configuration options for column translation.

use serde::{Deserialize, Serialize};

/// What to do with a column value that has no entry in the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmappedPolicy {
    /// Leave the value unchanged.
    #[default]
    PassThrough,
    /// Leave the value unchanged and log the distinct unmapped codes.
    Warn,
    /// Reject the translation.
    Fail,
}

/// Options for translating coded columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationOptions {
    /// Handling of codes missing from the mapping.
    pub unmapped: UnmappedPolicy,
}

impl TranslationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unmapped(mut self, policy: UnmappedPolicy) -> Self {
        self.unmapped = policy;
        self
    }
}
