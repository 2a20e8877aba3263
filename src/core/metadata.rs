//! Distribution metadata for the packaged tool.

use semver::Version;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::platform::DEFAULT_LAUNCHER;

/// Tool identifier used when none is configured.
pub const DEFAULT_TOOL_ID: &str = "nionui";

/// Version used when none is configured.
pub const DEFAULT_VERSION: &str = "0.5.0";

/// A console script installed alongside the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Command name on the user's PATH
    pub name: String,

    /// `module:function` target
    pub target: String,
}

impl EntryPoint {
    /// Render as `name=target`.
    pub fn spec(&self) -> String {
        format!("{}={}", self.name, self.target)
    }
}

/// Everything the backend needs to describe the distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub tool_id: String,
    pub launcher: String,
    pub name: String,
    pub version: Version,
    pub packages: Vec<String>,
    pub url: Url,
    pub license: String,
    pub author: String,
    pub author_email: String,
    pub description: String,
    pub console_scripts: Vec<EntryPoint>,
    pub classifiers: Vec<String>,

    /// Always true: the payload is platform specific, so the ABI and platform
    /// tags must be carried even without extension modules.
    pub binary: bool,
}

impl PackageMetadata {
    /// Build metadata for a tool and its launcher.
    pub fn new(tool_id: &str, launcher: &str, version: Version) -> anyhow::Result<Self> {
        let url = Url::parse(&format!("https://github.com/nion-software/{}-tool", tool_id))?;

        Ok(PackageMetadata {
            tool_id: tool_id.to_string(),
            launcher: launcher.to_string(),
            name: format!("{}-tool", tool_id),
            version,
            packages: vec![format!("nion.{}_tool", tool_id)],
            url,
            license: "Apache-2.0".to_string(),
            author: "Nion Software Team".to_string(),
            author_email: "software@nion.com".to_string(),
            description: "Python command line access to Nion UI Launcher".to_string(),
            console_scripts: vec![EntryPoint {
                name: format!("{}-tool", tool_id),
                target: format!("nion.{}_tool.command:main", tool_id),
            }],
            classifiers: vec!["License :: OSI Approved :: Apache Software License".to_string()],
            binary: true,
        })
    }

    /// Metadata for the stock tool at its stock version.
    pub fn stock() -> anyhow::Result<Self> {
        PackageMetadata::new(DEFAULT_TOOL_ID, DEFAULT_LAUNCHER, Version::parse(DEFAULT_VERSION)?)
    }

    /// The distribution name with `-` folded to `_`, as used in archive names.
    pub fn escaped_name(&self) -> String {
        self.name.replace('-', "_")
    }
}
