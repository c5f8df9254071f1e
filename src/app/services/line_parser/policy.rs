//! Field policies selecting tokenization and required fields
//!
//! The strict and positional presets are not interchangeable: under the
//! strict preset a missing middle field shifts every later field one slot to
//! the left, while the positional preset keeps each column where it was typed.

use crate::constants::{POSITIONAL_MIN_FIELDS, STRICT_MIN_FIELDS};
use serde::{Deserialize, Serialize};

/// Tokenization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Drop empty tokens before indexing
    Strict,
    /// Keep empty tokens in place so column positions survive omissions
    Positional,
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Strict => write!(f, "strict"),
            PolicyKind::Positional => write!(f, "positional"),
        }
    }
}

/// How month/day date patterns must cover the token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateMatching {
    /// Pattern anchored at the start; trailing text is ignored
    Prefix,
    /// Pattern must cover the whole token
    FullToken,
}

/// Complete policy for one parser instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPolicy {
    pub kind: PolicyKind,

    /// Fewer tokens than this fails with `InsufficientFields`
    pub min_fields: usize,

    /// Reject lines without an origin address
    pub require_from_location: bool,

    pub date_matching: DateMatching,
}

impl FieldPolicy {
    /// Drops empty tokens, needs date/name/phone, requires an origin address,
    /// matches date phrases by prefix
    pub fn strict() -> Self {
        Self {
            kind: PolicyKind::Strict,
            min_fields: STRICT_MIN_FIELDS,
            require_from_location: true,
            date_matching: DateMatching::Prefix,
        }
    }

    /// Keeps empty tokens in place, origin address optional, date phrases
    /// must match the whole token
    pub fn positional() -> Self {
        Self {
            kind: PolicyKind::Positional,
            min_fields: POSITIONAL_MIN_FIELDS,
            require_from_location: false,
            date_matching: DateMatching::FullToken,
        }
    }

    /// Preset for a policy kind
    pub fn for_kind(kind: PolicyKind) -> Self {
        match kind {
            PolicyKind::Strict => Self::strict(),
            PolicyKind::Positional => Self::positional(),
        }
    }

    /// Override whether the origin address is mandatory
    pub fn with_required_from_location(mut self, required: bool) -> Self {
        self.require_from_location = required;
        self
    }

    /// Whether empty tokens are discarded by the tokenizer
    pub fn drops_empty_tokens(&self) -> bool {
        self.kind == PolicyKind::Strict
    }
}

impl Default for FieldPolicy {
    fn default() -> Self {
        Self::strict()
    }
}
