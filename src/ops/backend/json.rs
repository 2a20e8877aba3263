//! JSON backend: describe the package for an external packager.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{PackageReport, PackageRequest, PackagingBackend};
use crate::core::metadata::PackageMetadata;
use crate::core::tags::WheelTag;
use crate::util::fs::write_string;
use crate::util::hash::manifest_fingerprint;

/// Version of the document layout written by [`JsonBackend`].
pub const FORMAT_VERSION: u32 = 1;

/// The document an external packager consumes.
#[derive(Debug, Clone, Serialize)]
pub struct PackageDocument<'a> {
    pub format_version: u32,
    pub metadata: &'a PackageMetadata,
    pub tag: Option<&'a WheelTag>,
    pub archive: Option<String>,

    /// Structural fingerprint of the manifest
    pub manifest_fingerprint: String,

    /// `(destination, sources)` pairs in manifest order
    pub data_files: Vec<(&'a str, &'a [PathBuf])>,
}

impl<'a> PackageDocument<'a> {
    pub fn new(request: &'a PackageRequest) -> Self {
        PackageDocument {
            format_version: FORMAT_VERSION,
            metadata: &request.metadata,
            tag: request.tag.as_ref(),
            archive: request.archive_name(),
            manifest_fingerprint: manifest_fingerprint(&request.manifest),
            data_files: request
                .manifest
                .iter()
                .map(|entry| (entry.destination.as_str(), entry.sources.as_slice()))
                .collect(),
        }
    }
}

/// Writes a [`PackageDocument`] to a file, or to stdout.
#[derive(Debug, Clone, Default)]
pub struct JsonBackend {
    output: Option<PathBuf>,
}

impl JsonBackend {
    /// Backend writing to `output`, or stdout when `None`.
    pub fn new(output: Option<PathBuf>) -> Self {
        JsonBackend { output }
    }

    /// Render the document for `request`.
    pub fn render(request: &PackageRequest) -> Result<String> {
        serde_json::to_string_pretty(&PackageDocument::new(request))
            .context("failed to serialize package document")
    }
}

impl PackagingBackend for JsonBackend {
    fn name(&self) -> &'static str {
        "json"
    }

    fn package(&self, request: &PackageRequest) -> Result<PackageReport> {
        let document = Self::render(request)?;

        let mut total_size = 0;
        for (_, source) in request.manifest.files() {
            let path = request.source_on_disk(source);
            total_size += std::fs::metadata(&path)
                .with_context(|| format!("failed to stat {}", path.display()))?
                .len();
        }

        match &self.output {
            Some(path) => {
                write_string(path, &document)?;
                tracing::debug!("Wrote package document: {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", document).context("failed to write to stdout")?;
            }
        }

        Ok(PackageReport {
            backend: self.name(),
            output: self.output.clone(),
            files: request.manifest.file_count(),
            total_size,
        })
    }
}
