//! Filesystem utilities.
//!
//! The centerpiece is [`discover_files`], the read-only walk over a pre-built
//! launcher tree.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Failure while walking a source tree.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("cannot read source root `{}`", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("source root `{}` is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("path `{}` is not valid UTF-8", path.display())]
    NonUtf8 { path: PathBuf },

    #[error("failed to traverse `{}`", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl WalkError {
    /// The path the failure is about.
    pub fn path(&self) -> &Path {
        match self {
            WalkError::Unreadable { path, .. }
            | WalkError::NotADirectory { path }
            | WalkError::NonUtf8 { path }
            | WalkError::Traversal { path, .. } => path,
        }
    }
}

/// A regular file found under a source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path of the file, prefixed by the root it was found under
    pub source_path: PathBuf,

    /// Immediate parent of `source_path`
    pub containing_directory: PathBuf,
}

/// Lazily enumerate every regular file below `root`.
///
/// Symbolic links are neither yielded nor followed, whatever they point at.
/// Within a directory, files are yielded before subdirectories are entered,
/// each group in file-name order, so repeated walks over an unchanged tree
/// agree.
///
/// A missing root or a root that is not a directory fails up front; failures
/// below the root, including file paths that are not valid UTF-8, surface as
/// `Err` items and end the walk for the caller.
pub fn discover_files(
    root: &Path,
) -> Result<impl Iterator<Item = Result<DiscoveredFile, WalkError>>, WalkError> {
    let meta = fs::metadata(root).map_err(|source| WalkError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .sort_by(|a, b| {
            let a_dir = a.file_type().is_dir();
            let b_dir = b.file_type().is_dir();
            match (a_dir, b_dir) {
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                _ => a.file_name().cmp(b.file_name()),
            }
        });

    let files = walker.into_iter().filter_map(move |entry| {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_fallback(&source));
                return Some(Err(WalkError::Traversal { path, source }));
            }
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            tracing::trace!("skipping symlink {}", entry.path().display());
            return None;
        }
        if !file_type.is_file() {
            return None;
        }

        if entry.path().to_str().is_none() {
            return Some(Err(WalkError::NonUtf8 {
                path: entry.into_path(),
            }));
        }

        let source_path = entry.into_path();
        let containing_directory = source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Some(Ok(DiscoveredFile {
            source_path,
            containing_directory,
        }))
    });

    Ok(files)
}

fn root_fallback(err: &walkdir::Error) -> PathBuf {
    err.loop_ancestor().map(Path::to_path_buf).unwrap_or_default()
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TreeFixture;

    fn collect(root: &Path) -> Vec<PathBuf> {
        discover_files(root)
            .unwrap()
            .map(|f| f.unwrap().source_path)
            .collect()
    }

    #[test]
    fn test_discovers_nested_files() {
        let tree = TreeFixture::new()
            .file("root/a/b/x.bin")
            .file("root/a/c/y.bin")
            .file("root/top.txt")
            .build();

        let files = collect(&tree.path().join("root"));
        let rel: Vec<PathBuf> = files.iter().map(|p| tree.relative(p)).collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("root/top.txt"),
                PathBuf::from("root/a/b/x.bin"),
                PathBuf::from("root/a/c/y.bin"),
            ]
        );
    }

    #[test]
    fn test_containing_directory_is_parent() {
        let tree = TreeFixture::new().file("root/a/x.bin").build();

        let file = discover_files(&tree.path().join("root"))
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(file.containing_directory, tree.path().join("root/a"));
    }

    #[test]
    fn test_empty_directories_yield_nothing() {
        let tree = TreeFixture::new().dir("root/empty/deeper").build();
        assert!(collect(&tree.path().join("root")).is_empty());
    }

    #[test]
    fn test_missing_root_fails() {
        let tree = TreeFixture::new().build();
        let missing = tree.path().join("nope");

        let err = discover_files(&missing).err().unwrap();
        assert!(matches!(err, WalkError::Unreadable { .. }));
        assert_eq!(err.path(), missing.as_path());
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_file_root_fails() {
        let tree = TreeFixture::new().file("root").build();
        let err = discover_files(&tree.path().join("root")).err().unwrap();
        assert!(matches!(err, WalkError::NotADirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let tree = TreeFixture::new()
            .file("root/a/b/x.bin")
            .file("outside/secret.bin")
            .symlink("root/a/b", "root/a/link")
            .symlink("outside/secret.bin", "root/a/file_link")
            .symlink("outside", "root/outside_link")
            .build();

        let rel: Vec<PathBuf> = collect(&tree.path().join("root"))
            .iter()
            .map(|p| tree.relative(p))
            .collect();
        assert_eq!(rel, vec![PathBuf::from("root/a/b/x.bin")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_yields_error() {
        use std::os::unix::fs::PermissionsExt;

        let tree = TreeFixture::new()
            .file("root/a/x.bin")
            .file("root/b/y.bin")
            .build();
        let locked = tree.path().join("root/b");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root.
        let readable = fs::read_dir(&locked).is_ok();
        let items: Vec<_> = discover_files(&tree.path().join("root")).unwrap().collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        match &items[1] {
            Err(err @ WalkError::Traversal { .. }) => assert_eq!(err.path(), locked.as_path()),
            other => panic!("expected a traversal error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let tree = TreeFixture::new()
            .file("root/real.bin")
            .symlink("does/not/exist", "root/dangling")
            .build();

        assert_eq!(collect(&tree.path().join("root")).len(), 1);
    }
}
