//! Configuration file support for launchpack.
//!
//! Two locations are read:
//! - Global: `~/.launchpack/config.toml` - User-wide defaults
//! - Project: `.launchpack/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::metadata::{PackageMetadata, DEFAULT_TOOL_ID, DEFAULT_VERSION};
use crate::core::platform::{ProfileOverrides, DEFAULT_LAUNCHER};

/// launchpack configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Distribution identity
    pub package: PackageConfig,

    /// Manifest build settings
    pub build: BuildConfig,

    /// Staging backend settings
    pub stage: StageConfig,
}

/// Distribution identity overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Tool identifier (e.g. `nionui`)
    pub tool_id: Option<String>,

    /// Launcher name used in install prefixes
    pub launcher: Option<String>,

    /// Distribution version
    pub version: Option<Version>,
}

/// Profile overrides and policy for manifest builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Replace the profile's source root
    pub source_root: Option<PathBuf>,

    /// Replace the profile's install prefix
    pub install_prefix: Option<String>,

    /// Replace the profile's drop count
    pub drop_count: Option<usize>,

    /// Treat an unsupported host as an error instead of a warning
    pub strict: bool,
}

/// Staging backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Default staging directory
    pub out_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or
    /// malformed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.package.tool_id.is_some() {
            self.package.tool_id = other.package.tool_id;
        }
        if other.package.launcher.is_some() {
            self.package.launcher = other.package.launcher;
        }
        if other.package.version.is_some() {
            self.package.version = other.package.version;
        }

        if other.build.source_root.is_some() {
            self.build.source_root = other.build.source_root;
        }
        if other.build.install_prefix.is_some() {
            self.build.install_prefix = other.build.install_prefix;
        }
        if other.build.drop_count.is_some() {
            self.build.drop_count = other.build.drop_count;
        }
        if other.build.strict {
            self.build.strict = true;
        }

        if other.stage.out_dir.is_some() {
            self.stage.out_dir = other.stage.out_dir;
        }
    }

    /// Launcher name, falling back to the stock launcher.
    pub fn launcher(&self) -> &str {
        self.package.launcher.as_deref().unwrap_or(DEFAULT_LAUNCHER)
    }

    /// Profile overrides from the `[build]` section.
    pub fn profile_overrides(&self) -> ProfileOverrides {
        ProfileOverrides {
            source_root: self.build.source_root.clone(),
            install_prefix: self.build.install_prefix.clone(),
            drop_count: self.build.drop_count,
        }
    }

    /// Distribution metadata with `[package]` overrides applied.
    pub fn metadata(&self) -> Result<PackageMetadata> {
        let tool_id = self.package.tool_id.as_deref().unwrap_or(DEFAULT_TOOL_ID);
        let version = match &self.package.version {
            Some(version) => version.clone(),
            None => Version::parse(DEFAULT_VERSION)?,
        };

        PackageMetadata::new(tool_id, self.launcher(), version)
            .with_context(|| format!("invalid package metadata for tool `{}`", tool_id))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.launchpack/config.toml)
/// 2. Global config (~/.launchpack/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global launchpack config directory (~/.launchpack).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".launchpack"))
}

/// Get the global config path (~/.launchpack/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.launchpack/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".launchpack").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.package.tool_id.is_none());
        assert!(config.build.drop_count.is_none());
        assert!(!config.build.strict);
        assert_eq!(config.launcher(), "NionUILauncher");
        assert!(config.profile_overrides().is_empty());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[package]
tool_id = "nionswift"
launcher = "SwiftLauncher"
version = "1.2.0"

[build]
source_root = "out/linux"
drop_count = 2
strict = true

[stage]
out_dir = "dist/stage"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.package.tool_id.as_deref(), Some("nionswift"));
        assert_eq!(config.package.version, Some(Version::new(1, 2, 0)));
        assert_eq!(config.build.source_root, Some(PathBuf::from("out/linux")));
        assert_eq!(config.build.drop_count, Some(2));
        assert!(config.build.strict);
        assert_eq!(config.stage.out_dir, Some(PathBuf::from("dist/stage")));

        let meta = config.metadata().unwrap();
        assert_eq!(meta.name, "nionswift-tool");
        assert_eq!(meta.launcher, "SwiftLauncher");
        assert_eq!(meta.version, Version::new(1, 2, 0));
    }

    #[test]
    fn test_invalid_version_rejected() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[package]\nversion = \"not-a-version\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.drop_count = Some(4);
        base.package.launcher = Some("A".to_string());

        let mut override_cfg = Config::default();
        override_cfg.package.launcher = Some("B".to_string());

        base.merge(override_cfg);

        assert_eq!(base.launcher(), "B");
        assert_eq!(base.build.drop_count, Some(4)); // Not overridden
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            "[build]\ninstall_prefix = \"bin\"\ndrop_count = 1\n",
        )
        .unwrap();
        std::fs::write(&project_path, "[build]\ndrop_count = 2\n").unwrap();

        let config = load_config(Some(&global_path), &project_path);
        assert_eq!(config.build.install_prefix.as_deref(), Some("bin"));
        assert_eq!(config.build.drop_count, Some(2));
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
    }
}
