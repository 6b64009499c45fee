use crate::domain::{NormalizedVersion, Release};

/// Keeps releases whose version lies in `[from, to]`, both bounds inclusive.
///
/// Input order is preserved. A reversed range (`from > to`) selects nothing.
pub fn filter_by_range(
    releases: Vec<Release>,
    from: &NormalizedVersion,
    to: &NormalizedVersion,
) -> Vec<Release> {
    releases
        .into_iter()
        .filter(|release| in_range(&release.valid_version, from, to))
        .collect()
}

pub fn in_range(version: &NormalizedVersion, from: &NormalizedVersion, to: &NormalizedVersion) -> bool {
    from <= version && version <= to
}
