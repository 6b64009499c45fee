use crate::domain::{FilterState, NormalizedVersion, PinnedRange, Release};

/// Applies the inclusion toggles to a release list, preserving order.
///
/// Releases tagged exactly like one of the pinned endpoints are always kept.
pub fn apply_filters(releases: Vec<Release>, filters: FilterState, pinned: &PinnedRange) -> Vec<Release> {
    releases
        .into_iter()
        .filter(|release| pinned.pins(&release.tag_name) || passes(&release.valid_version, filters))
        .collect()
}

/// Evaluates the toggles against one version, first matching rule wins.
///
/// Major/minor/patch classification is positional: `2.0.0` is only ever a
/// major bump and `1.2.3` is only ever a patch, whatever the other components.
pub fn passes(version: &NormalizedVersion, filters: FilterState) -> bool {
    let pre = version.pre_release();
    let (major, minor, patch) = (version.major(), version.minor(), version.patch());

    if !filters.include_beta && pre.is_some_and(|p| p.contains("beta")) {
        return false;
    }
    if !filters.include_rc && pre.is_some_and(|p| p.contains("rc")) {
        return false;
    }
    if !filters.include_patch && patch > 0 {
        return false;
    }
    if !filters.include_minor && minor > 0 && patch == 0 {
        return false;
    }
    if !filters.include_major && major > 0 && minor == 0 && patch == 0 {
        return false;
    }
    true
}
