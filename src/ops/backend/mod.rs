//! Packaging backends.
//!
//! A backend takes a finished manifest plus the distribution's metadata and
//! tags and turns them into something installable. The manifest builder never
//! formats tags or copies files itself; that is the backend's job.

pub mod json;
pub mod staging;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::core::manifest::Manifest;
use crate::core::metadata::PackageMetadata;
use crate::core::tags::WheelTag;

pub use json::JsonBackend;
pub use staging::StagingBackend;

/// Everything handed across the backend boundary.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub metadata: PackageMetadata,

    /// `None` when the host had no platform profile
    pub tag: Option<WheelTag>,

    pub manifest: Manifest,

    /// Directory the manifest's relative source paths are resolved against
    pub base_dir: PathBuf,
}

impl PackageRequest {
    /// Archive name, when a tag is known.
    pub fn archive_name(&self) -> Option<String> {
        self.tag.as_ref().map(|tag| tag.archive_name(&self.metadata))
    }

    /// Resolve a manifest source path on disk.
    pub fn source_on_disk(&self, source: &Path) -> PathBuf {
        self.base_dir.join(source)
    }
}

/// What a backend produced.
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    /// Backend that produced the report
    pub backend: &'static str,

    /// Primary output (file or directory); `None` when written to stdout or
    /// nothing was written
    pub output: Option<PathBuf>,

    /// Number of payload files handled
    pub files: usize,

    /// Total payload size in bytes
    pub total_size: u64,
}

/// A consumer of finished manifests.
pub trait PackagingBackend {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Produce the package.
    fn package(&self, request: &PackageRequest) -> Result<PackageReport>;
}
