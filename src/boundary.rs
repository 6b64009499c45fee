use std::fmt;

/// Warnings about the requested version range.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The lower endpoint sorts above the upper one, so nothing can match
    ReversedRange { from: String, to: String },
    /// The range is valid but no release falls inside it
    NoReleasesInRange { from: String, to: String },
    /// Releases whose tags could not be read as versions were skipped
    UnparsableTags { count: usize },
    /// Paging stopped at the configured limit while more pages remained
    PageLimitReached { pages: u32 },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ReversedRange { from, to } => {
                write!(
                    f,
                    "Range is reversed: '{}' is newer than '{}'; swap them to see releases",
                    from, to
                )
            }
            BoundaryWarning::NoReleasesInRange { from, to } => {
                write!(f, "No releases found between '{}' and '{}'", from, to)
            }
            BoundaryWarning::UnparsableTags { count } => {
                let noun = if *count == 1 { "release" } else { "releases" };
                write!(
                    f,
                    "Skipped {} {} with tags that are not versions",
                    count, noun
                )
            }
            BoundaryWarning::PageLimitReached { pages } => {
                write!(
                    f,
                    "Stopped after {} page(s) (max_pages); older releases may be missing",
                    pages
                )
            }
        }
    }
}
