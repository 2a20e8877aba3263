//! High-level operations.
//!
//! Manifest building lives in [`package_files`]; turning a manifest into a
//! package is the job of the [`backend`] implementations.

pub mod backend;
pub mod errors;
pub mod package_files;

pub use backend::{JsonBackend, PackageReport, PackageRequest, PackagingBackend, StagingBackend};
pub use errors::{ManifestError, StageError};
pub use package_files::{
    assemble, build_manifest, destination_for, package_files, BuildOptions, BuildOutcome,
};
