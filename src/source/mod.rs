//! Bundle sources
//!
//! A source knows which bundles exist, how to describe them, and how to put a
//! bundle's files on disk so the installer can copy them:
//! - [`local`]: a working copy of this project with a `skills/` directory
//! - [`remote`]: the configured repository, through its tree API and archive

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Result, SkillError};
use crate::temp::{CleanupRegistry, ScratchDir};
use crate::transport::HttpBackend;

pub mod local;
pub mod remote;

pub use local::LocalSource;
pub use remote::RemoteSource;

/// A bundle's files ready to be copied
#[derive(Debug)]
pub struct StagedBundle {
    pub path: PathBuf,
    /// Keeps downloaded files alive until the copy is done
    _scratch: Option<ScratchDir>,
}

impl StagedBundle {
    /// Bundle read in place
    pub fn in_place(path: PathBuf) -> Self {
        Self {
            path,
            _scratch: None,
        }
    }

    /// Bundle extracted into a scratch directory
    pub fn scratch(path: PathBuf, scratch: ScratchDir) -> Self {
        Self {
            path,
            _scratch: Some(scratch),
        }
    }
}

/// Where bundles are read from
pub trait BundleSource {
    /// Human-readable location, used in messages
    fn location(&self) -> String;

    /// Installable bundle names, sorted; never empty
    fn list_bundles(&self) -> Result<Vec<String>>;

    /// Single-line description, empty when unavailable
    fn describe(&self, name: &str) -> String;

    /// Put the bundle's files on disk
    fn stage(&self, name: &str) -> Result<StagedBundle>;

    /// Fail unless `name` is exactly one of the listed bundles
    fn validate(&self, name: &str) -> Result<()> {
        if self.list_bundles()?.iter().any(|b| b == name) {
            Ok(())
        } else {
            Err(SkillError::BundleNotFound {
                name: name.to_string(),
            })
        }
    }
}

/// Pick the local source when running from a checkout, the remote one otherwise
pub fn open(settings: &Settings, registry: &CleanupRegistry) -> Result<Box<dyn BundleSource>> {
    if let Some(root) = local_root(settings) {
        tracing::debug!(root = %root.display(), "using local source");
        return Ok(Box::new(LocalSource::new(root)));
    }

    let backend = HttpBackend::detect()?;
    tracing::debug!(repository = %settings.repository, branch = %settings.branch, "using remote source");
    Ok(Box::new(RemoteSource::new(
        backend,
        settings.clone(),
        registry.clone(),
    )))
}

fn local_root(settings: &Settings) -> Option<PathBuf> {
    if let Some(dir) = &settings.source_dir {
        return Some(dir.clone());
    }
    let exe = std::env::current_exe().ok()?;
    let exe = dunce::canonicalize(&exe).unwrap_or(exe);
    exe.ancestors().skip(1).find(|dir| is_local_repo(dir)).map(Path::to_path_buf)
}

/// A directory is a local checkout when it is a git working copy that also
/// holds this installer's own entry point
pub fn is_local_repo(dir: &Path) -> bool {
    dir.join("Cargo.toml").is_file()
        && dir.join("src/main.rs").is_file()
        && git2::Repository::open(dir).is_ok()
}
