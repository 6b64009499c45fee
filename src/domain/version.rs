use crate::domain::prerelease::PreRelease;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Canonical `MAJOR.MINOR.PATCH[-PRERELEASE]` grammar after prefix stripping.
///
/// ASCII classes are spelled out because `\d` and `\w` are Unicode-aware in `regex`.
const VERSION_PATTERN: &str = r"^([0-9]+)\.([0-9]+)(?:\.([0-9]+))?(-[A-Za-z0-9_]+)?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

/// A release tag normalized to `MAJOR.MINOR.PATCH[-PRERELEASE]`
///
/// Only [`normalize`] produces values of this type, so every instance satisfies
/// the canonical grammar. Equality and ordering follow semantic-version
/// precedence, not the text: `01.2.0` and `1.2.0` compare equal.
#[derive(Debug, Clone)]
pub struct NormalizedVersion {
    text: String,
    major: u64,
    minor: u64,
    patch: u64,
    pre: Option<PreRelease>,
}

impl NormalizedVersion {
    /// Canonical text, e.g. "2.0.0-beta"
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre.as_ref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

impl Ord for NormalizedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for NormalizedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NormalizedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NormalizedVersion {}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Normalizes a raw tag into a canonical semantic version.
///
/// Strips a package scope (everything up to the last `@`), then a single
/// leading `v`, then requires `MAJOR.MINOR[.PATCH][-PRERELEASE]` where the
/// pre-release is a single run of word characters. A missing patch becomes `0`.
///
/// # Returns
/// * `Some(NormalizedVersion)` - the canonical version
/// * `None` - the tag is not a recognizable version
///
/// # Example
/// ```
/// use release_range::domain::normalize;
///
/// assert_eq!(normalize("v1.2.3").unwrap().as_str(), "1.2.3");
/// assert_eq!(normalize("pkg@2.0.0-beta").unwrap().as_str(), "2.0.0-beta");
/// assert_eq!(normalize("1.2").unwrap().as_str(), "1.2.0");
/// assert!(normalize("pkg@2.0.0-beta.1").is_none());
/// assert!(normalize("v1").is_none());
/// ```
pub fn normalize(raw: &str) -> Option<NormalizedVersion> {
    let unscoped = match raw.rfind('@') {
        Some(at) => &raw[at + 1..],
        None => raw,
    };
    let bare = unscoped.strip_prefix('v').unwrap_or(unscoped);

    let captures = version_regex().captures(bare)?;
    let major_text = captures.get(1)?.as_str();
    let minor_text = captures.get(2)?.as_str();
    let patch_text = captures.get(3).map_or("0", |m| m.as_str());
    let pre_text = captures.get(4).map_or("", |m| m.as_str());

    // Components too large for u64 cannot be ordered, so they are rejected like any other bad tag
    let major = major_text.parse::<u64>().ok()?;
    let minor = minor_text.parse::<u64>().ok()?;
    let patch = patch_text.parse::<u64>().ok()?;
    let pre = pre_text.strip_prefix('-').map(PreRelease::parse);

    Some(NormalizedVersion {
        text: format!("{}.{}.{}{}", major_text, minor_text, patch_text, pre_text),
        major,
        minor,
        patch,
        pre,
    })
}

/// Normalizes an untyped value, rejecting anything that is not a string.
///
/// Tag names arriving through loosely-typed JSON (e.g. `"tag_name": 42`) go through here.
pub fn normalize_value(value: &serde_json::Value) -> Option<NormalizedVersion> {
    value.as_str().and_then(normalize)
}
