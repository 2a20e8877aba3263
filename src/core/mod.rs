//! Core data structures for launchpack.

pub mod manifest;
pub mod metadata;
pub mod platform;
pub mod tags;

pub use manifest::{Manifest, ManifestEntry};
pub use metadata::{EntryPoint, PackageMetadata};
pub use platform::{
    resolve_profile, CpuArch, HostIdentity, OsFamily, PlatformProfile, ProfileOverrides,
};
pub use tags::WheelTag;
