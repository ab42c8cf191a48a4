//! Local bundle discovery
//!
//! Bundles are the immediate subdirectories of `<root>/skills` that contain a
//! `SKILL.md`.

use std::path::{Path, PathBuf};

use super::{BundleSource, StagedBundle};
use crate::config::{BUNDLES_ROOT, MANIFEST_FILE};
use crate::error::{Result, SkillError};
use crate::manifest;

/// Bundles read from a source tree on disk
#[derive(Debug, Clone)]
pub struct LocalSource {
    bundles_dir: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            bundles_dir: root.as_ref().join(BUNDLES_ROOT),
        }
    }

    fn bundle_dir(&self, name: &str) -> PathBuf {
        self.bundles_dir.join(name)
    }
}

/// Check if a directory is a bundle directory
fn is_bundle_directory(path: &Path) -> bool {
    path.is_dir() && path.join(MANIFEST_FILE).is_file()
}

impl BundleSource for LocalSource {
    fn location(&self) -> String {
        self.bundles_dir.display().to_string()
    }

    fn list_bundles(&self) -> Result<Vec<String>> {
        let no_bundles = || SkillError::NoBundlesFound {
            location: self.location(),
        };
        let entries = std::fs::read_dir(&self.bundles_dir).map_err(|_| no_bundles())?;

        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| is_bundle_directory(&entry.path()))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();

        if names.is_empty() {
            return Err(no_bundles());
        }
        Ok(names)
    }

    fn describe(&self, name: &str) -> String {
        std::fs::read_to_string(self.bundle_dir(name).join(MANIFEST_FILE))
            .map(|text| manifest::describe(&text))
            .unwrap_or_default()
    }

    fn stage(&self, name: &str) -> Result<StagedBundle> {
        let dir = self.bundle_dir(name);
        if !is_bundle_directory(&dir) {
            return Err(SkillError::BundleNotFound {
                name: name.to_string(),
            });
        }
        Ok(StagedBundle::in_place(dir))
    }
}
