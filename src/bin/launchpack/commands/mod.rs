//! Command implementations

pub mod completions;
pub mod manifest;
pub mod profile;
pub mod stage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::cli::{GlobalArgs, PlatformArgs};
use launchpack::core::platform::{CpuArch, HostIdentity, OsFamily};
use launchpack::ops::{build_manifest, BuildOptions, BuildOutcome, PackageRequest};
use launchpack::util::config::{global_config_path, load_config, project_config_path};
use launchpack::util::shell::Status;
use launchpack::util::{Config, Shell};
use launchpack::WheelTag;

/// State shared by the profile-selecting commands.
pub struct Session {
    pub project_dir: PathBuf,
    pub config: Config,
    pub shell: Arc<Shell>,
}

impl Session {
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let project_dir = match &global.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("failed to determine current directory")?,
        };
        if !project_dir.is_dir() {
            bail!("project directory `{}` does not exist", project_dir.display());
        }

        let global_path = global_config_path();
        let config = load_config(global_path.as_deref(), &project_config_path(&project_dir));
        let shell = Arc::new(Shell::from_flags(global.quiet, global.verbose, global.color));

        Ok(Session {
            project_dir,
            config,
            shell,
        })
    }

    /// Host identity from `--os`/`--arch`, defaulting to the running host.
    pub fn host(&self, platform: &PlatformArgs) -> HostIdentity {
        let current = HostIdentity::current();
        HostIdentity::new(
            platform
                .os
                .as_deref()
                .map(|s| s.parse().unwrap_or_else(|_| OsFamily::Other(s.to_string())))
                .unwrap_or(current.os),
            platform
                .arch
                .as_deref()
                .map(|s| s.parse().unwrap_or_else(|_| CpuArch::Other(s.to_string())))
                .unwrap_or(current.arch),
        )
    }

    /// Build the manifest, applying the unsupported-platform policy.
    pub fn build(&self, platform: &PlatformArgs, strict: bool) -> Result<BuildOutcome> {
        let host = self.host(platform);
        let opts = BuildOptions::new(&self.project_dir)
            .with_host(host.clone())
            .with_launcher(self.config.launcher())
            .with_overrides(self.config.profile_overrides());

        self.shell
            .status(Status::Collecting, format!("launcher files for {}", host));
        let outcome = build_manifest(&opts)?;

        if let BuildOutcome::UnsupportedPlatform { host } = &outcome {
            if strict || self.config.build.strict {
                bail!(
                    "no platform profile for host `{}` (supported: macos, windows, linux)",
                    host
                );
            }
            self.shell.warn(format!(
                "no platform profile for host `{}`; the package will contain no launcher files",
                host
            ));
        }

        Ok(outcome)
    }

    /// Package request for a finished build.
    pub fn request(&self, outcome: BuildOutcome) -> Result<PackageRequest> {
        let tag = outcome.profile().map(WheelTag::from_profile);
        Ok(PackageRequest {
            metadata: self.config.metadata()?,
            tag,
            manifest: outcome.into_manifest(),
            base_dir: self.project_dir.clone(),
        })
    }
}
