//! Manifest building: walk the launcher tree, rehome each file, group by
//! destination.
//!
//! The pipeline is linear: a profile is selected once, the source root is
//! walked once, every discovered file is mapped to a destination directory,
//! and the results are grouped into a [`Manifest`].

use std::path::{Component, Path, PathBuf};

use crate::core::manifest::Manifest;
use crate::core::platform::{
    resolve_profile, HostIdentity, PlatformProfile, ProfileOverrides, DEFAULT_LAUNCHER,
};
use crate::ops::errors::ManifestError;
use crate::util::fs::discover_files;

/// Inputs to a manifest build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Identity the profile is selected for
    pub host: HostIdentity,

    /// Launcher name used in install prefixes
    pub launcher: String,

    /// Directory the profile's relative source root is resolved against
    pub base_dir: PathBuf,

    /// Adjustments applied to the selected profile
    pub overrides: ProfileOverrides,
}

impl BuildOptions {
    /// Options for the running host, rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        BuildOptions {
            host: HostIdentity::current(),
            launcher: DEFAULT_LAUNCHER.to_string(),
            base_dir: base_dir.into(),
            overrides: ProfileOverrides::default(),
        }
    }

    pub fn with_host(mut self, host: HostIdentity) -> Self {
        self.host = host;
        self
    }

    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    pub fn with_overrides(mut self, overrides: ProfileOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Result of a manifest build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A profile was selected and its tree collected.
    Built {
        profile: PlatformProfile,
        manifest: Manifest,
    },

    /// The host matches no profile. Nothing was read from disk and the
    /// package carries no files; callers decide whether that is acceptable.
    UnsupportedPlatform { host: HostIdentity },
}

impl BuildOutcome {
    pub fn profile(&self) -> Option<&PlatformProfile> {
        match self {
            BuildOutcome::Built { profile, .. } => Some(profile),
            BuildOutcome::UnsupportedPlatform { .. } => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, BuildOutcome::UnsupportedPlatform { .. })
    }

    /// The manifest; empty for an unsupported platform.
    pub fn into_manifest(self) -> Manifest {
        match self {
            BuildOutcome::Built { manifest, .. } => manifest,
            BuildOutcome::UnsupportedPlatform { .. } => Manifest::new(),
        }
    }
}

/// Select a profile for the configured host and collect its manifest.
pub fn build_manifest(opts: &BuildOptions) -> Result<BuildOutcome, ManifestError> {
    let Some(profile) = resolve_profile(&opts.host, &opts.launcher) else {
        tracing::debug!("no platform profile for {}", opts.host);
        return Ok(BuildOutcome::UnsupportedPlatform {
            host: opts.host.clone(),
        });
    };
    let profile = profile.with_overrides(&opts.overrides);

    tracing::debug!(
        "collecting {} (prefix `{}`, dropping {} segments)",
        profile.source_root.display(),
        profile.install_prefix,
        profile.drop_count
    );

    let manifest = package_files(
        &opts.base_dir,
        &profile.source_root,
        &profile.install_prefix,
        profile.drop_count,
    )?;

    Ok(BuildOutcome::Built { profile, manifest })
}

/// Walk `base_dir/source_root` and group its files by destination.
///
/// Source paths in the manifest, and the paths destinations are derived from,
/// are relative to `base_dir` (an absolute `source_root` stays absolute).
pub fn package_files(
    base_dir: &Path,
    source_root: &Path,
    install_prefix: &str,
    drop_count: usize,
) -> Result<Manifest, ManifestError> {
    let root = base_dir.join(source_root);
    let collect_err = |source| ManifestError::Collect {
        root: source_root.to_path_buf(),
        source,
    };

    let relative = source_root.is_relative();
    let mut pairs = Vec::new();
    for file in discover_files(&root).map_err(collect_err)? {
        let file = file.map_err(collect_err)?;
        let (source, containing) = if relative {
            (
                relative_to(&file.source_path, base_dir),
                relative_to(&file.containing_directory, base_dir),
            )
        } else {
            (file.source_path, file.containing_directory)
        };
        let destination = destination_for(&containing, install_prefix, drop_count);

        tracing::debug!("{} -> {}", source.display(), destination);
        pairs.push((destination, source));
    }

    Ok(assemble(pairs))
}

/// Group `(destination, source)` pairs into a manifest.
pub fn assemble(pairs: impl IntoIterator<Item = (String, PathBuf)>) -> Manifest {
    let mut manifest = Manifest::new();
    for (destination, source) in pairs {
        manifest.insert(destination, source);
    }
    manifest
}

/// Destination directory for files living in `containing_directory`.
///
/// The first `drop_count` segments are discarded and the rest are joined
/// under `install_prefix`. Dropping more segments than the path has is not an
/// error: the result is `install_prefix` itself.
///
/// A root, drive prefix or `..` segment counts toward `drop_count` but is never
/// joined, so the result always stays under `install_prefix`.
pub fn destination_for(containing_directory: &Path, install_prefix: &str, drop_count: usize) -> String {
    let mut destination = PathBuf::from(install_prefix);
    for segment in path_segments(containing_directory).into_iter().skip(drop_count) {
        if let Component::Normal(segment) = segment {
            destination.push(segment);
        }
    }
    destination.to_string_lossy().into_owned()
}

/// Split a path into segments. A root or drive prefix is a segment of its
/// own; `.` components are not segments.
pub fn path_segments(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
