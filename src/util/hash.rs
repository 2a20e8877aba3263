//! Hashing utilities for checksums and fingerprinting.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::core::manifest::Manifest;

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Fingerprint of a manifest's structure: destinations, sources and their
/// order. Identical manifests always produce identical fingerprints.
pub fn manifest_fingerprint(manifest: &Manifest) -> String {
    let mut hasher = Sha256::new();
    for entry in manifest {
        hasher.update(b"\x01"); // Entry marker
        hasher.update(entry.destination.as_bytes());
        hasher.update(b"\0");
        for source in &entry.sources {
            hasher.update(source.to_string_lossy().as_bytes());
            hasher.update(b"\0");
        }
    }
    hex::encode(hasher.finalize())
}
