//! Workspace layout: the fixed on-disk paths a west workspace is made of.

use std::path::{Path, PathBuf};

/// Content of `.west/config`, declaring where the manifest lives relative to
/// the workspace root. Written verbatim by the initializer.
pub const WEST_CONFIG: &str = "[manifest]\npath = zephyr\nfile = west.yml\n";

/// A west workspace, addressed by its root directory.
///
/// Holds no open handles and caches nothing; every operation re-resolves the
/// paths it needs so repeated invocations see a consistent view of the disk.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Create a workspace handle for the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The hidden `.west` configuration directory.
    pub fn west_dir(&self) -> PathBuf {
        self.root.join(".west")
    }

    /// The link-configuration file, `.west/config`.
    pub fn west_config(&self) -> PathBuf {
        self.west_dir().join("config")
    }

    /// The `zephyr` symlink to the RTOS source tree. The name is fixed by
    /// the link-configuration content, not configurable.
    pub fn rtos_link(&self) -> PathBuf {
        self.root.join("zephyr")
    }

    /// The manifest file inside the linked RTOS tree, `zephyr/west.yml`.
    /// Owned and mutated by west, never by this crate.
    pub fn manifest(&self) -> PathBuf {
        self.rtos_link().join("west.yml")
    }

    /// The fingerprint record, `.west/west.sha256`.
    pub fn fingerprint_record(&self) -> PathBuf {
        self.west_dir().join("west.sha256")
    }
}
