//! Workspace validation.
//!
//! The validator inspects a workspace and decides whether it is correctly
//! initialized and unmodified since the last successful initialization. It
//! is read-only: no on-disk state is mutated, and every finding is reported
//! through a [`CheckReport`] rather than printed from here.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fingerprint::fingerprint_files;
use crate::workspace::Workspace;

/// Outcome of a workspace check.
///
/// Preconditions are evaluated in a fixed order and the first violation
/// wins, so a workspace missing everything still reports `MissingLinkConfig`.
/// Each failure outcome maps to a distinct process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckOutcome {
    /// Workspace is consistent with the recorded fingerprint.
    Valid,
    /// `.west/config` is missing.
    MissingLinkConfig,
    /// The `zephyr` link does not resolve to the expected RTOS tree.
    LinkMismatch,
    /// `zephyr/west.yml` is missing.
    MissingManifest,
    /// `.west/west.sha256` is missing.
    MissingFingerprint,
    /// The stored fingerprint does not match the current configuration.
    FingerprintMismatch,
}

impl CheckOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::MissingLinkConfig => 1,
            Self::LinkMismatch => 2,
            Self::MissingManifest => 3,
            Self::MissingFingerprint => 4,
            Self::FingerprintMismatch => 5,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Result of validating one workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub workspace_root: PathBuf,
    pub outcome: CheckOutcome,
    /// One-line diagnostic naming the offending path, absent when valid.
    pub message: Option<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_valid()
    }

    /// Print a colorized terminal report.
    pub fn print(&self) {
        if self.is_valid() {
            println!(
                "{} Workspace {} is consistent",
                "✓".green().bold(),
                self.workspace_root.display().to_string().bright_white()
            );
        } else if let Some(message) = &self.message {
            println!("{} {}", "✗".red().bold(), message);
        }
    }
}

/// Read-only validator for a workspace against an expected RTOS tree.
pub struct WorkspaceValidator {
    workspace: Workspace,
    rtos_dir: PathBuf,
}

impl WorkspaceValidator {
    /// Create a validator for the workspace rooted at `workspace_root`.
    pub fn new(workspace_root: impl AsRef<Path>, rtos_dir: impl AsRef<Path>) -> Self {
        Self {
            workspace: Workspace::new(workspace_root),
            rtos_dir: rtos_dir.as_ref().to_path_buf(),
        }
    }

    /// Check the workspace, failing fast on the first violated precondition.
    ///
    /// Returns `Err` only for fatal I/O failures (e.g. an unreadable file
    /// that exists); every expected inconsistency is a [`CheckOutcome`].
    pub fn check(&self) -> Result<CheckReport> {
        let west_config = self.workspace.west_config();
        if !west_config.exists() {
            return Ok(self.report(
                CheckOutcome::MissingLinkConfig,
                format!("{} does not exist", west_config.display()),
            ));
        }

        let link = self.workspace.rtos_link();
        if !same_directory(&link, &self.rtos_dir) {
            return Ok(self.report(
                CheckOutcome::LinkMismatch,
                format!(
                    "{} does not point to the expected Zephyr directory {}",
                    link.display(),
                    self.rtos_dir.display()
                ),
            ));
        }

        let manifest = self.workspace.manifest();
        if !manifest.exists() {
            return Ok(self.report(
                CheckOutcome::MissingManifest,
                format!("{} does not exist", manifest.display()),
            ));
        }

        let record = self.workspace.fingerprint_record();
        if !record.exists() {
            return Ok(self.report(
                CheckOutcome::MissingFingerprint,
                format!("{} does not exist", record.display()),
            ));
        }

        let stored = fs::read_to_string(&record)
            .with_context(|| format!("Failed to read {}", record.display()))?;
        let current = fingerprint_files(&manifest, &west_config)?;
        if stored != current {
            return Ok(self.report(
                CheckOutcome::FingerprintMismatch,
                "Stored fingerprint does not match the current west configuration".to_string(),
            ));
        }

        Ok(CheckReport {
            workspace_root: self.workspace.root().to_path_buf(),
            outcome: CheckOutcome::Valid,
            message: None,
        })
    }

    fn report(&self, outcome: CheckOutcome, message: String) -> CheckReport {
        CheckReport {
            workspace_root: self.workspace.root().to_path_buf(),
            outcome,
            message: Some(message),
        }
    }
}

/// Whether `link` and `expected` resolve to the same filesystem object.
///
/// A link that is missing, dangling, or unresolvable counts as a mismatch.
fn same_directory(link: &Path, expected: &Path) -> bool {
    match (fs::canonicalize(link), fs::canonicalize(expected)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
