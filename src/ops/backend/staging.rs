//! Staging backend: lay the payload out on disk the way it appears inside
//! the archive.
//!
//! Each source is copied to
//! `<out>/<name>-<version>.data/data/<destination>/<file name>`. Alongside the
//! payload the backend writes `SHA256SUMS` and a `launchpack-stage.json`
//! summary describing every staged file.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use super::{PackageReport, PackageRequest, PackagingBackend};
use crate::core::tags::WheelTag;
use crate::ops::errors::StageError;
use crate::util::fs::{ensure_dir, write_string};
use crate::util::hash::{manifest_fingerprint, sha256_file};
use crate::util::shell::Shell;

/// File name of the checksum listing.
pub const CHECKSUMS_FILE: &str = "SHA256SUMS";

/// File name of the stage summary.
pub const SUMMARY_FILE: &str = "launchpack-stage.json";

/// Options for staging a package.
#[derive(Debug, Clone)]
pub struct StageOptions {
    /// Directory the payload is laid out in
    pub out_dir: PathBuf,

    /// Log what would be copied without touching the filesystem
    pub dry_run: bool,
}

impl Default for StageOptions {
    fn default() -> Self {
        StageOptions {
            out_dir: PathBuf::from("stage"),
            dry_run: false,
        }
    }
}

impl StageOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        StageOptions {
            out_dir: out_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One file placed in the stage.
#[derive(Debug, Clone, Serialize)]
pub struct StagedFile {
    /// Manifest source path
    pub source: PathBuf,

    /// Path inside the archive
    pub target: PathBuf,

    pub size: u64,

    /// Empty in dry-run mode
    pub sha256: String,
}

/// Summary written next to the payload.
#[derive(Debug, Clone, Serialize)]
pub struct StageSummary<'a> {
    pub name: &'a str,
    pub version: String,
    pub tag: Option<&'a WheelTag>,
    pub archive: Option<String>,
    pub manifest_fingerprint: String,
    pub files: &'a [StagedFile],
}

/// Copies a manifest's files into a staging directory.
#[derive(Debug, Clone)]
pub struct StagingBackend {
    opts: StageOptions,
    shell: Option<Arc<Shell>>,
}

impl StagingBackend {
    pub fn new(opts: StageOptions) -> Self {
        StagingBackend { opts, shell: None }
    }

    /// Report copy progress through `shell`.
    pub fn with_shell(mut self, shell: Arc<Shell>) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Archive-relative directory holding installed data files.
    pub fn data_dir(request: &PackageRequest) -> PathBuf {
        PathBuf::from(format!(
            "{}-{}.data",
            request.metadata.escaped_name(),
            request.metadata.version
        ))
        .join("data")
    }

    /// Compute the archive path of every manifest file, rejecting collisions
    /// and paths that would leave the stage.
    pub fn plan(request: &PackageRequest) -> Result<Vec<(PathBuf, PathBuf)>, StageError> {
        let data_dir = Self::data_dir(request);
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut plan = Vec::with_capacity(request.manifest.file_count());

        for (destination, source) in request.manifest.files() {
            let file_name = source.file_name().ok_or_else(|| StageError::NoFileName {
                path: source.to_path_buf(),
            })?;
            let target = data_dir.join(destination).join(file_name);
            if !stays_inside(&target) {
                return Err(StageError::OutsidePackage {
                    target,
                    file: source.to_path_buf(),
                });
            }

            if let Some(first) = claimed.get(&target) {
                return Err(StageError::Collision {
                    target,
                    first: first.clone(),
                    second: source.to_path_buf(),
                });
            }
            claimed.insert(target.clone(), source.to_path_buf());
            plan.push((source.to_path_buf(), target));
        }

        Ok(plan)
    }

    fn stage_file(&self, request: &PackageRequest, source: &Path, target: &Path) -> Result<StagedFile> {
        let on_disk = request.source_on_disk(source);
        let size = std::fs::metadata(&on_disk)
            .with_context(|| format!("failed to stat {}", on_disk.display()))?
            .len();

        if self.opts.dry_run {
            tracing::info!("[dry-run] Would copy {} -> {}", source.display(), target.display());
            return Ok(StagedFile {
                source: source.to_path_buf(),
                target: target.to_path_buf(),
                size,
                sha256: String::new(),
            });
        }

        let dest = self.opts.out_dir.join(target);
        if let Some(parent) = dest.parent() {
            ensure_dir(parent)?;
        }
        std::fs::copy(&on_disk, &dest).with_context(|| {
            format!("failed to copy {} -> {}", on_disk.display(), dest.display())
        })?;
        tracing::debug!("Copied {} -> {}", on_disk.display(), dest.display());

        Ok(StagedFile {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            size,
            sha256: sha256_file(&dest)?,
        })
    }

    fn write_records(&self, request: &PackageRequest, staged: &[StagedFile]) -> Result<()> {
        let mut sums = String::new();
        for file in staged {
            sums.push_str(&format!("{}  {}\n", file.sha256, archive_path(&file.target)));
        }
        write_string(&self.opts.out_dir.join(CHECKSUMS_FILE), &sums)?;

        let summary = StageSummary {
            name: &request.metadata.name,
            version: request.metadata.version.to_string(),
            tag: request.tag.as_ref(),
            archive: request.archive_name(),
            manifest_fingerprint: manifest_fingerprint(&request.manifest),
            files: staged,
        };
        let json = serde_json::to_string_pretty(&summary).context("failed to serialize stage summary")?;
        write_string(&self.opts.out_dir.join(SUMMARY_FILE), &json)
    }
}

impl PackagingBackend for StagingBackend {
    fn name(&self) -> &'static str {
        "staging"
    }

    fn package(&self, request: &PackageRequest) -> Result<PackageReport> {
        let plan = Self::plan(request)?;

        if !self.opts.dry_run {
            ensure_dir(&self.opts.out_dir)?;
        }

        let mut progress = self
            .shell
            .as_ref()
            .map(|shell| shell.progress(plan.len() as u64, "Staging"));

        let mut staged = Vec::with_capacity(plan.len());
        for (source, target) in &plan {
            staged.push(self.stage_file(request, source, target)?);
            if let Some(progress) = progress.as_mut() {
                progress.inc(1);
            }
        }
        if let Some(progress) = &progress {
            progress.finish();
        }

        if !self.opts.dry_run {
            self.write_records(request, &staged)?;
            tracing::debug!("Staged {} files in {}", staged.len(), self.opts.out_dir.display());
        }

        Ok(PackageReport {
            backend: self.name(),
            output: (!self.opts.dry_run).then(|| self.opts.out_dir.clone()),
            files: staged.len(),
            total_size: staged.iter().map(|f| f.size).sum(),
        })
    }
}

/// Whether `path` is relative and never climbs out of its base.
fn stays_inside(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Render an archive path with `/` separators.
fn archive_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
