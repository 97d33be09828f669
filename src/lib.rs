//! Workspace bootstrap and validation for Zephyr RTOS west builds.
//!
//! This crate establishes a west workspace linked to an existing Zephyr
//! source tree and records a fingerprint of its configuration, so later
//! invocations can verify consistency without re-running `west update`.

pub mod check;
pub mod fingerprint;
pub mod init;
pub mod west;
pub mod workspace;

pub use check::{CheckOutcome, CheckReport, WorkspaceValidator};
pub use fingerprint::fingerprint_files;
pub use init::{InitReport, WorkspaceInitializer};
pub use west::{parse_env, ProcessWestRunner, WestInvocation, WestRunner};
pub use workspace::{Workspace, WEST_CONFIG};
