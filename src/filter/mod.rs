//! Release filtering - version range, inclusion toggles and endpoint selection

pub mod attributes;
pub mod range;
pub mod selection;

pub use attributes::apply_filters;
pub use range::filter_by_range;
pub use selection::filter_selectable_versions;
