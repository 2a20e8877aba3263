//! Test utilities for launchpack unit tests.
//!
//! Fixtures build real directory trees in a temporary directory so the walker
//! and the manifest builder can be exercised against the actual filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use launchpack::test_support::TreeFixture;
//!
//! let tree = TreeFixture::new()
//!     .file("launcher/linux/x64/NionUILauncher/NionUILauncher")
//!     .symlink("launcher/linux/x64/NionUILauncher", "launcher/linux/x64/alias")
//!     .build();
//! ```

pub mod fixtures;

pub use fixtures::*;
