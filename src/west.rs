//! External west tool invocation.
//!
//! West is treated as an opaque collaborator: it receives an environment and
//! a working directory and mutates the manifest as a side effect. The
//! [`WestRunner`] trait keeps the subprocess boundary injectable so tests can
//! substitute a runner that records calls and returns controlled results.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything needed to invoke the west script once.
#[derive(Debug, Clone)]
pub struct WestInvocation {
    /// Interpreter used to execute the script (west is a Python tool).
    pub interpreter: PathBuf,
    /// Path to the west script itself.
    pub script: PathBuf,
    /// Exact subprocess environment; the caller's own environment is not
    /// inherited.
    pub env: HashMap<String, String>,
}

/// Runs `west update` for a workspace.
pub trait WestRunner {
    /// Invoke `west update` with cwd set to `workspace_root`. A non-zero
    /// exit is a fatal error.
    fn run_update(&self, invocation: &WestInvocation, workspace_root: &Path) -> Result<()>;
}

/// Production runner: spawns the interpreter as a blocking subprocess.
pub struct ProcessWestRunner;

impl WestRunner for ProcessWestRunner {
    fn run_update(&self, invocation: &WestInvocation, workspace_root: &Path) -> Result<()> {
        let status = Command::new(&invocation.interpreter)
            .arg(&invocation.script)
            .arg("update")
            .env_clear()
            .envs(&invocation.env)
            .current_dir(workspace_root)
            .status()
            .with_context(|| {
                format!(
                    "Failed to run {} {} update",
                    invocation.interpreter.display(),
                    invocation.script.display()
                )
            })?;

        if !status.success() {
            bail!("west update failed with {}", status);
        }
        Ok(())
    }
}

/// Parse a space-separated list of `KEY=VALUE` tokens into an environment
/// map. Each token is split on its first `=`, so values may contain `=`.
pub fn parse_env(raw: &str) -> Result<HashMap<String, String>> {
    let mut env = HashMap::new();
    for token in raw.split_whitespace() {
        let (key, value) = token
            .split_once('=')
            .with_context(|| format!("Invalid KEY=VALUE token '{}' in west environment", token))?;
        env.insert(key.to_string(), value.to_string());
    }
    Ok(env)
}

#[cfg(test)]
#[path = "west_tests.rs"]
mod tests;
