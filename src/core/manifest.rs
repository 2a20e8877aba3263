//! The package manifest: where each discovered file gets installed.
//!
//! A [`Manifest`] is an ordered list of [`ManifestEntry`] values, one per
//! destination directory. Entries keep the order in which their destination
//! was first seen, and each entry keeps its sources in the order they were
//! added.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Files installed into one destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Install-root-relative destination directory
    pub destination: String,

    /// Source files copied into `destination`, in discovery order
    pub sources: Vec<PathBuf>,
}

impl ManifestEntry {
    pub fn new(destination: impl Into<String>) -> Self {
        ManifestEntry {
            destination: destination.into(),
            sources: Vec::new(),
        }
    }
}

/// Insertion-ordered mapping from destination directory to source files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ManifestEntry>", into = "Vec<ManifestEntry>")]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
    /// destination -> position in `entries`
    index: HashMap<String, usize>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Manifest::default()
    }

    /// Record `source` under `destination`.
    ///
    /// A destination seen for the first time is appended as a new entry;
    /// otherwise `source` joins the existing entry's list.
    pub fn insert(&mut self, destination: impl Into<String>, source: impl Into<PathBuf>) {
        let destination = destination.into();
        let slot = match self.index.get(&destination) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(destination.clone(), slot);
                self.entries.push(ManifestEntry::new(destination));
                slot
            }
        };
        self.entries[slot].sources.push(source.into());
    }

    /// Entries in first-occurrence order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Look up the entry for a destination.
    pub fn get(&self, destination: &str) -> Option<&ManifestEntry> {
        self.index.get(destination).map(|&slot| &self.entries[slot])
    }

    /// Number of destination directories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of source files across all entries.
    pub fn file_count(&self) -> usize {
        self.entries.iter().map(|e| e.sources.len()).sum()
    }

    /// Iterate over `(destination, source)` pairs in manifest order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().flat_map(|entry| {
            entry
                .sources
                .iter()
                .map(move |source| (entry.destination.as_str(), source.as_path()))
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }
}

impl PartialEq for Manifest {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Manifest {}

impl From<Vec<ManifestEntry>> for Manifest {
    fn from(entries: Vec<ManifestEntry>) -> Self {
        let mut manifest = Manifest::new();
        for entry in entries {
            if entry.sources.is_empty() && manifest.get(&entry.destination).is_none() {
                let slot = manifest.entries.len();
                manifest.index.insert(entry.destination.clone(), slot);
                manifest.entries.push(ManifestEntry::new(entry.destination));
                continue;
            }
            for source in entry.sources {
                manifest.insert(entry.destination.clone(), source);
            }
        }
        manifest
    }
}

impl From<Manifest> for Vec<ManifestEntry> {
    fn from(manifest: Manifest) -> Self {
        manifest.entries
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_order() {
        let mut manifest = Manifest::new();
        manifest.insert("bin/b", "root/b/1");
        manifest.insert("bin/a", "root/a/1");
        manifest.insert("bin/b", "root/b/2");

        let destinations: Vec<&str> =
            manifest.iter().map(|e| e.destination.as_str()).collect();
        assert_eq!(destinations, vec!["bin/b", "bin/a"]);
        assert_eq!(
            manifest.get("bin/b").unwrap().sources,
            vec![PathBuf::from("root/b/1"), PathBuf::from("root/b/2")]
        );
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.file_count(), 3);
    }

    #[test]
    fn test_keys_are_exact_strings() {
        // No normalization beyond what the caller produced.
        let mut manifest = Manifest::new();
        manifest.insert("bin/a", "x");
        manifest.insert("bin/a/", "y");
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_files_iterates_in_manifest_order() {
        let mut manifest = Manifest::new();
        manifest.insert("d1", "a");
        manifest.insert("d2", "b");
        manifest.insert("d1", "c");

        let files: Vec<(&str, &Path)> = manifest.files().collect();
        assert_eq!(
            files,
            vec![
                ("d1", Path::new("a")),
                ("d1", Path::new("c")),
                ("d2", Path::new("b")),
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let mut manifest = Manifest::new();
        manifest.insert("bin/a/b", "root/a/b/x.bin");

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "destination": "bin/a/b", "sources": ["root/a/b/x.bin"] }
            ])
        );

        let back: Manifest = serde_json::from_value(json).unwrap();
        assert_eq!(back, manifest);
        assert!(back.get("bin/a/b").is_some());
    }
}
