use crate::domain::FilterState;

/// Narrows the list of tags offered as range endpoints.
///
/// Matching is a case-insensitive substring test on the raw tag name:
/// `rc` and `beta` tags go when their toggle is off, and anything matching a
/// hide pattern always goes.
pub fn filter_selectable_versions(
    tags: &[String],
    filters: FilterState,
    hide_patterns: &[String],
) -> Vec<String> {
    let hide: Vec<String> = hide_patterns.iter().map(|p| p.to_lowercase()).collect();

    tags.iter()
        .filter(|tag| {
            let lower = tag.to_lowercase();
            if !filters.include_rc && lower.contains("rc") {
                return false;
            }
            if !filters.include_beta && lower.contains("beta") {
                return false;
            }
            !hide.iter().any(|pattern| lower.contains(pattern.as_str()))
        })
        .cloned()
        .collect()
}
