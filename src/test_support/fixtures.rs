//! Directory-tree fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

#[derive(Debug, Clone)]
enum Node {
    Dir(PathBuf),
    File(PathBuf, Vec<u8>),
    Symlink { target: PathBuf, link: PathBuf },
}

/// Builder for an on-disk tree of files, directories and symlinks.
///
/// All paths are relative to the fixture root. Nodes are created in the order
/// they were declared.
#[derive(Debug, Clone, Default)]
pub struct TreeFixture {
    nodes: Vec<Node>,
}

impl TreeFixture {
    pub fn new() -> Self {
        TreeFixture::default()
    }

    /// Add an empty directory.
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.nodes.push(Node::Dir(path.as_ref().to_path_buf()));
        self
    }

    /// Add a file whose content is its own relative path.
    pub fn file(self, path: impl AsRef<Path>) -> Self {
        let content = path.as_ref().to_string_lossy().into_owned().into_bytes();
        self.file_with(path, content)
    }

    /// Add a file with explicit content.
    pub fn file_with(mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.nodes
            .push(Node::File(path.as_ref().to_path_buf(), content.into()));
        self
    }

    /// Add a symlink at `link` pointing to `target` (both fixture-relative).
    pub fn symlink(mut self, target: impl AsRef<Path>, link: impl AsRef<Path>) -> Self {
        self.nodes.push(Node::Symlink {
            target: target.as_ref().to_path_buf(),
            link: link.as_ref().to_path_buf(),
        });
        self
    }

    /// Materialize the tree in a fresh temporary directory.
    pub fn build(self) -> BuiltTree {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        for node in self.nodes {
            match node {
                Node::Dir(path) => fs::create_dir_all(root.join(path)).unwrap(),
                Node::File(path, content) => {
                    let path = root.join(path);
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent).unwrap();
                    }
                    fs::write(path, content).unwrap();
                }
                Node::Symlink { target, link } => {
                    let link = root.join(link);
                    if let Some(parent) = link.parent() {
                        fs::create_dir_all(parent).unwrap();
                    }
                    symlink(&root.join(target), &link).unwrap();
                }
            }
        }

        BuiltTree { dir }
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

/// A materialized [`TreeFixture`]; removed from disk on drop.
#[derive(Debug)]
pub struct BuiltTree {
    dir: TempDir,
}

impl BuiltTree {
    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Strip the tree root from `path`.
    pub fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.path())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
