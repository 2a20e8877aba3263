//! Platform profiles - which payload gets packaged, and how.
//!
//! A [`PlatformProfile`] bundles every platform-dependent parameter of a
//! packaging run: the compatibility tags handed to the backend, where the
//! pre-built launcher tree lives, and where its files are installed.
//!
//! Profiles are selected from a [`HostIdentity`] by [`resolve_profile`]. Hosts
//! outside the table get no profile at all.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Launcher name used in install prefixes when none is configured.
pub const DEFAULT_LAUNCHER: &str = "NionUILauncher";

/// Interpreter versions every profile supports.
pub const INTERPRETER_RANGE: &str = "cp39.cp310.cp311.cp312";

/// Stable-ABI marker.
pub const ABI_STABLE: &str = "abi3";

/// No ABI constraint.
pub const ABI_NONE: &str = "none";

/// Leading segments of a build-output path that never reach the install tree.
pub const DEFAULT_DROP_COUNT: usize = 3;

/// Operating system family of a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    MacOs,
    Windows,
    Linux,
    /// Anything else, keyed by its raw name.
    Other(String),
}

impl OsFamily {
    /// The OS family this binary was compiled for.
    pub fn current() -> Self {
        std::env::consts::OS.parse().unwrap_or_else(|_| OsFamily::Other(String::new()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            OsFamily::MacOs => "macos",
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::Other(name) => name,
        }
    }
}

impl FromStr for OsFamily {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "macos" | "darwin" | "osx" => OsFamily::MacOs,
            "windows" | "win32" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            other => OsFamily::Other(other.to_string()),
        })
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processor architecture of a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuArch {
    Arm64,
    X86_64,
    Other(String),
}

impl CpuArch {
    /// The architecture this binary was compiled for.
    pub fn current() -> Self {
        std::env::consts::ARCH.parse().unwrap_or_else(|_| CpuArch::Other(String::new()))
    }

    /// Whether this is an ARM processor.
    pub fn is_arm(&self) -> bool {
        matches!(self, CpuArch::Arm64)
    }

    pub fn as_str(&self) -> &str {
        match self {
            CpuArch::Arm64 => "arm64",
            CpuArch::X86_64 => "x86_64",
            CpuArch::Other(name) => name,
        }
    }
}

impl FromStr for CpuArch {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "arm64" | "aarch64" | "arm" => CpuArch::Arm64,
            "x86_64" | "amd64" | "x64" => CpuArch::X86_64,
            other => CpuArch::Other(other.to_string()),
        })
    }
}

impl fmt::Display for CpuArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the machine a profile is selected for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostIdentity {
    pub os: OsFamily,
    pub arch: CpuArch,
}

impl HostIdentity {
    pub fn new(os: OsFamily, arch: CpuArch) -> Self {
        HostIdentity { os, arch }
    }

    /// Identity of the running process.
    pub fn current() -> Self {
        HostIdentity::new(OsFamily::current(), CpuArch::current())
    }
}

impl fmt::Display for HostIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Platform-dependent packaging parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Target OS/architecture tag (e.g. `manylinux1_x86_64`)
    pub compatibility_tag: String,

    /// Supported interpreter versions (e.g. `cp39.cp310.cp311.cp312`)
    pub interpreter_range_tag: String,

    /// Binary-interface tag; `none` means unconstrained
    pub abi_tag: String,

    /// Install-root-relative directory the payload is rehomed under
    pub install_prefix: String,

    /// Root of the pre-built tree, relative to the project directory
    pub source_root: PathBuf,

    /// Leading path segments dropped before rehoming
    pub drop_count: usize,
}

/// Config-level adjustments applied on top of a selected profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOverrides {
    pub source_root: Option<PathBuf>,
    pub install_prefix: Option<String>,
    pub drop_count: Option<usize>,
}

impl ProfileOverrides {
    pub fn is_empty(&self) -> bool {
        self.source_root.is_none() && self.install_prefix.is_none() && self.drop_count.is_none()
    }
}

impl PlatformProfile {
    /// Apply overrides, keeping any field the overrides leave unset.
    pub fn with_overrides(mut self, overrides: &ProfileOverrides) -> Self {
        if let Some(root) = &overrides.source_root {
            self.source_root = root.clone();
        }
        if let Some(prefix) = &overrides.install_prefix {
            self.install_prefix = prefix.clone();
        }
        if let Some(drop) = overrides.drop_count {
            self.drop_count = drop;
        }
        self
    }
}

/// Select the profile for `host`, or `None` when the host is not supported.
///
/// `launcher` names the launcher subdirectory used by the Windows and Linux
/// install prefixes.
pub fn resolve_profile(host: &HostIdentity, launcher: &str) -> Option<PlatformProfile> {
    let profile = match host.os {
        OsFamily::MacOs => {
            let compatibility_tag = if host.arch.is_arm() {
                "macosx_11_0_arm64"
            } else {
                "macosx_10_11_intel"
            };
            PlatformProfile {
                compatibility_tag: compatibility_tag.to_string(),
                interpreter_range_tag: INTERPRETER_RANGE.to_string(),
                abi_tag: ABI_STABLE.to_string(),
                install_prefix: "bin".to_string(),
                source_root: PathBuf::from("launcher/build/Release"),
                drop_count: DEFAULT_DROP_COUNT,
            }
        }
        OsFamily::Windows => PlatformProfile {
            compatibility_tag: "win_amd64".to_string(),
            interpreter_range_tag: INTERPRETER_RANGE.to_string(),
            abi_tag: ABI_NONE.to_string(),
            install_prefix: format!("Scripts/{}", launcher),
            source_root: PathBuf::from("launcher/x64/Release"),
            drop_count: DEFAULT_DROP_COUNT,
        },
        OsFamily::Linux => PlatformProfile {
            compatibility_tag: "manylinux1_x86_64".to_string(),
            interpreter_range_tag: INTERPRETER_RANGE.to_string(),
            abi_tag: ABI_STABLE.to_string(),
            install_prefix: format!("bin/{}", launcher),
            source_root: PathBuf::from("launcher/linux/x64"),
            drop_count: DEFAULT_DROP_COUNT,
        },
        OsFamily::Other(_) => return None,
    };

    Some(profile)
}
