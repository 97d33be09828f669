//! Workspace initialization.
//!
//! Initialization is idempotent: a workspace that already validates is left
//! untouched. Anything else is destructively reset, relinked to the RTOS
//! tree, updated through west, and stamped with a fresh fingerprint.

use anyhow::{ensure, Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::check::WorkspaceValidator;
use crate::fingerprint::fingerprint_files;
use crate::west::{WestInvocation, WestRunner};
use crate::workspace::{Workspace, WEST_CONFIG};

/// Result of one initialization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitReport {
    pub workspace_root: PathBuf,
    /// True when the validator short-circuited and nothing was touched.
    pub already_valid: bool,
    /// Fingerprint recorded by this run, absent on the short-circuit path.
    pub fingerprint: Option<String>,
}

impl InitReport {
    /// Print a colorized terminal report.
    pub fn print(&self) {
        if self.already_valid {
            println!(
                "{} Workspace {} already consistent, nothing to do",
                "✓".green().bold(),
                self.workspace_root.display().to_string().bright_white()
            );
        } else {
            println!(
                "{} Workspace {} initialized",
                "✓".green().bold(),
                self.workspace_root.display().to_string().bright_white()
            );
            if let Some(fingerprint) = &self.fingerprint {
                println!("  {} {}", "fingerprint:".dimmed(), fingerprint.dimmed());
            }
        }
    }
}

/// Initializer for a workspace linked to one RTOS tree.
pub struct WorkspaceInitializer {
    workspace: Workspace,
    rtos_dir: PathBuf,
}

impl WorkspaceInitializer {
    /// Create an initializer for the workspace rooted at `workspace_root`.
    pub fn new(workspace_root: impl AsRef<Path>, rtos_dir: impl AsRef<Path>) -> Self {
        Self {
            workspace: Workspace::new(workspace_root),
            rtos_dir: rtos_dir.as_ref().to_path_buf(),
        }
    }

    /// Ensure the workspace ends in a valid state.
    ///
    /// Short-circuits when the workspace already validates. Otherwise the
    /// root is cleared and rebuilt; any failure after the clear leaves the
    /// workspace inconsistent, which a later check flags and a later init
    /// repairs. No fingerprint is recorded unless west succeeds.
    pub fn init(&self, invocation: &WestInvocation, runner: &dyn WestRunner) -> Result<InitReport> {
        let validator = WorkspaceValidator::new(self.workspace.root(), &self.rtos_dir);
        if validator.check()?.is_valid() {
            return Ok(InitReport {
                workspace_root: self.workspace.root().to_path_buf(),
                already_valid: true,
                fingerprint: None,
            });
        }

        let root = self.workspace.root();
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create workspace {}", root.display()))?;
        self.clear_root()?;

        let west_dir = self.workspace.west_dir();
        fs::create_dir(&west_dir)
            .with_context(|| format!("Failed to create {}", west_dir.display()))?;
        let west_config = self.workspace.west_config();
        fs::write(&west_config, WEST_CONFIG)
            .with_context(|| format!("Failed to write {}", west_config.display()))?;

        ensure!(
            self.rtos_dir.is_dir(),
            "Zephyr directory {} does not exist",
            self.rtos_dir.display()
        );
        let link = self.workspace.rtos_link();
        symlink_dir(&self.rtos_dir, &link).with_context(|| {
            format!(
                "Failed to link {} to {}",
                link.display(),
                self.rtos_dir.display()
            )
        })?;

        runner.run_update(invocation, root)?;

        let digest = fingerprint_files(&self.workspace.manifest(), &west_config)?;
        let record = self.workspace.fingerprint_record();
        fs::write(&record, &digest)
            .with_context(|| format!("Failed to write {}", record.display()))?;

        Ok(InitReport {
            workspace_root: root.to_path_buf(),
            already_valid: false,
            fingerprint: Some(digest),
        })
    }

    /// Remove every entry directly inside the workspace root. Directory
    /// symlinks are removed as links, not traversed.
    fn clear_root(&self) -> Result<()> {
        let root = self.workspace.root();
        for entry in
            fs::read_dir(root).with_context(|| format!("Failed to read {}", root.display()))?
        {
            let entry = entry.with_context(|| format!("Failed to read {}", root.display()))?;
            let path = entry.path();
            // DirEntry::file_type does not follow symlinks, so a symlinked
            // directory is removed as a file-like entry below.
            let file_type = entry
                .file_type()
                .with_context(|| format!("Failed to stat {}", path.display()))?;
            if file_type.is_dir() {
                fs::remove_dir_all(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            } else {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
