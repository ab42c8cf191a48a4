//! Scratch directories for remote installs
//!
//! Every [`ScratchDir`] is removed when dropped and is also listed in a
//! [`CleanupRegistry`] so the signal handler can remove it when the process is
//! terminated before the destructor runs.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::TempDir;

use crate::error::Result;

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path, so temp dirs are never created under the current working
/// directory (avoids a checkout's tmp/ when TMPDIR=tmp and cwd is the checkout).
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Scratch paths that are still alive in this process
#[derive(Debug, Clone, Default)]
pub struct CleanupRegistry {
    paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        self.paths
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn register(&self, path: &Path) {
        self.lock().push(path.to_path_buf());
    }

    fn unregister(&self, path: &Path) {
        self.lock().retain(|p| p != path);
    }

    /// Remove every registered directory; used on termination signals
    pub fn remove_all(&self) {
        for path in self.lock().drain(..) {
            if let Err(e) = std::fs::remove_dir_all(&path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove scratch directory");
            }
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Temporary directory scoped to one command invocation
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
    registry: CleanupRegistry,
}

impl ScratchDir {
    pub fn new(registry: &CleanupRegistry) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("skill-install-")
            .tempdir_in(temp_dir_base())?;
        registry.register(dir.path());
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self {
            dir,
            registry: registry.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        self.registry.unregister(self.dir.path());
    }
}
