//! launchpack - assemble installable launcher packages
//!
//! A pre-built, platform-specific launcher tree is walked, every file is
//! assigned an install-time destination directory, and the result is grouped
//! into a [`Manifest`] that a packaging backend turns into a distribution.
//! Platform-dependent parameters come from a [`PlatformProfile`] selected from
//! the host's identity.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for launchpack unit tests.
///
/// Only compiled for tests. Builds real directory trees in temporary
/// directories.
#[cfg(test)]
pub mod test_support;

pub use core::{
    manifest::{Manifest, ManifestEntry},
    metadata::PackageMetadata,
    platform::{resolve_profile, HostIdentity, PlatformProfile},
    tags::WheelTag,
};

pub use ops::{build_manifest, BuildOptions, BuildOutcome, ManifestError};
