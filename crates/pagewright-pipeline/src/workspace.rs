//! Scoped temporary workspaces for task isolation
//!
//! Each task materializes its files in a freshly created, exclusively-owned
//! temporary directory. The directory is removed when the workspace is
//! dropped, including on error paths, so no locks are needed between
//! concurrent tasks.

use pagewright_core::Result;
use std::path::Path;

/// A per-task temporary working directory.
pub struct TaskWorkspace {
    dir: tempfile::TempDir,
}

impl TaskWorkspace {
    /// Create a fresh workspace.
    pub fn create() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write (or overwrite) a file at the workspace root.
    pub fn write(&self, name: &str, contents: &str) -> Result<()> {
        std::fs::write(self.dir.path().join(name), contents)?;
        Ok(())
    }
}
