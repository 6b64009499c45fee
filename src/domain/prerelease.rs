//! Pre-release identifiers and their precedence
//!
//! Follows semver.org precedence rules: https://semver.org/#spec-item-11
//! - numeric identifiers compare numerically
//! - alphanumeric identifiers compare lexically in ASCII order
//! - numeric identifiers have lower precedence than alphanumeric ones
//! - a shorter sequence has lower precedence when it is a prefix of the longer one

use std::fmt;

/// A single dot-separated pre-release identifier
///
/// Variant order matters: the derived `Ord` ranks every `Numeric` below every `AlphaNumeric`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl Identifier {
    fn parse(s: &str) -> Self {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<u64>() {
                return Identifier::Numeric(n);
            }
        }
        Identifier::AlphaNumeric(s.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Pre-release component of a version, without its leading `-`
///
/// The derived ordering is the lexicographic comparison of identifiers,
/// which gives the semver "shorter prefix is lower" rule for free.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    identifiers: Vec<Identifier>,
}

impl PreRelease {
    /// Split a pre-release string (e.g. "beta" or "rc.1") into identifiers
    pub fn parse(s: &str) -> Self {
        PreRelease {
            identifiers: s.split('.').map(Identifier::parse).collect(),
        }
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }

    /// Whether any identifier is exactly `name` (e.g. "beta", "rc")
    pub fn contains(&self, name: &str) -> bool {
        self.identifiers
            .iter()
            .any(|id| matches!(id, Identifier::AlphaNumeric(s) if s == name))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.identifiers.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}
