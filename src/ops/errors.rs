//! Error types for packaging operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::fs::WalkError;

/// The manifest could not be built. Always fatal; no partial manifest exists.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot collect launcher files from `{}`", root.display())]
    Collect {
        root: PathBuf,
        #[source]
        source: WalkError,
    },
}

impl ManifestError {
    /// The path the underlying filesystem failure is about.
    pub fn failed_path(&self) -> &std::path::Path {
        match self {
            ManifestError::Collect { source, .. } => source.path(),
        }
    }
}

/// A manifest cannot be laid out inside a package.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(
        "`{}` and `{}` would both be packaged as `{}`",
        first.display(),
        second.display(),
        target.display()
    )]
    Collision {
        target: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("`{}` would be staged at `{}`, outside the package", file.display(), target.display())]
    OutsidePackage { target: PathBuf, file: PathBuf },

    #[error("source `{}` has no file name", path.display())]
    NoFileName { path: PathBuf },
}
