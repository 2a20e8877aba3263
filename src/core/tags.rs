//! Compatibility tags for the built distribution.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::metadata::PackageMetadata;
use crate::core::platform::PlatformProfile;

/// The `interpreter-abi-platform` triple a distribution is built for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WheelTag {
    pub interpreter: String,
    pub abi: String,
    pub platform: String,
}

impl WheelTag {
    pub fn from_profile(profile: &PlatformProfile) -> Self {
        WheelTag {
            interpreter: profile.interpreter_range_tag.clone(),
            abi: profile.abi_tag.clone(),
            platform: profile.compatibility_tag.clone(),
        }
    }

    /// Archive file name for `metadata` built with this tag.
    pub fn archive_name(&self, metadata: &PackageMetadata) -> String {
        format!(
            "{}-{}-{}.whl",
            metadata.escaped_name(),
            metadata.version,
            self
        )
    }
}

impl fmt::Display for WheelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.interpreter, self.abi, self.platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::{resolve_profile, CpuArch, HostIdentity, OsFamily};

    fn linux_tag() -> WheelTag {
        let host = HostIdentity::new(OsFamily::Linux, CpuArch::X86_64);
        WheelTag::from_profile(&resolve_profile(&host, "NionUILauncher").unwrap())
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(
            linux_tag().to_string(),
            "cp39.cp310.cp311.cp312-abi3-manylinux1_x86_64"
        );
    }

    #[test]
    fn test_archive_name() {
        let meta = PackageMetadata::stock().unwrap();
        assert_eq!(
            linux_tag().archive_name(&meta),
            "nionui_tool-0.5.0-cp39.cp310.cp311.cp312-abi3-manylinux1_x86_64.whl"
        );
    }

    #[test]
    fn test_windows_tag_has_no_abi() {
        let host = HostIdentity::new(OsFamily::Windows, CpuArch::X86_64);
        let tag = WheelTag::from_profile(&resolve_profile(&host, "L").unwrap());
        assert_eq!(tag.to_string(), "cp39.cp310.cp311.cp312-none-win_amd64");
    }
}
