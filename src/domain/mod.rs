//! Domain logic - pure version and release rules independent of the hosting provider

pub mod prerelease;
pub mod release;
pub mod version;

pub use prerelease::{Identifier, PreRelease};
pub use release::{FilterState, PinnedRange, Release};
pub use version::{normalize, normalize_value, NormalizedVersion};
