//! Configuration fingerprinting.
//!
//! A workspace fingerprint is the SHA-256 digest over the full bytes of the
//! manifest file followed by the link-configuration file. Both recording
//! (after a successful init) and verification (during check) use this same
//! concatenation order; swapping it changes the digest.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Length of a hex-encoded fingerprint.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Compute the hex-encoded fingerprint over the manifest and the
/// link-configuration file, in that order.
pub fn fingerprint_files(manifest: &Path, west_config: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    stream_into(&mut hasher, manifest)?;
    stream_into(&mut hasher, west_config)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Feed the full contents of `path` into the hash accumulator.
fn stream_into(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    io::copy(&mut file, hasher).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
