//! Remote bundle discovery and retrieval
//!
//! Listing comes from the repository tree API, descriptions from raw manifest
//! URLs, and bundle files from the branch tarball.

use std::cell::OnceCell;
use std::path::Path;

use serde::Deserialize;

use super::{BundleSource, StagedBundle};
use crate::archive;
use crate::config::{BUNDLES_ROOT, MANIFEST_FILE, Settings};
use crate::error::{Result, SkillError};
use crate::manifest;
use crate::progress::Spinner;
use crate::temp::{CleanupRegistry, ScratchDir};
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct TreeListing {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
}

/// Bundles fetched from the configured repository
pub struct RemoteSource<T: Transport> {
    transport: T,
    settings: Settings,
    registry: CleanupRegistry,
    listing: OnceCell<Vec<String>>,
}

impl<T: Transport> RemoteSource<T> {
    pub fn new(transport: T, settings: Settings, registry: CleanupRegistry) -> Self {
        Self {
            transport,
            settings,
            registry,
            listing: OnceCell::new(),
        }
    }

    fn fetch_listing(&self) -> Result<Vec<String>> {
        let url = self.settings.tree_url();
        let body = self.transport.fetch_text(&url)?;
        let listing: TreeListing =
            serde_json::from_str(&body).map_err(|e| SkillError::Network {
                message: format!("unexpected response from {url}: {e}"),
            })?;
        if listing.truncated {
            tracing::warn!(%url, "repository tree listing is truncated");
        }
        Ok(bundle_names(listing.tree.iter().map(|e| e.path.as_str())))
    }
}

/// Names captured from paths of the form `skills/<name>/SKILL.md`, sorted and deduplicated
fn bundle_names<'a>(paths: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = paths
        .filter_map(|path| {
            let mut parts = path.split('/');
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(BUNDLES_ROOT), Some(name), Some(MANIFEST_FILE), None) if !name.is_empty() => {
                    Some(name.to_string())
                }
                _ => None,
            }
        })
        .collect();
    names.sort();
    names.dedup();
    names
}

impl<T: Transport> BundleSource for RemoteSource<T> {
    fn location(&self) -> String {
        format!("{}@{}", self.settings.repository, self.settings.branch)
    }

    fn list_bundles(&self) -> Result<Vec<String>> {
        if let Some(names) = self.listing.get() {
            return Ok(names.clone());
        }
        let names = self.fetch_listing()?;
        if names.is_empty() {
            return Err(SkillError::NoBundlesFound {
                location: self.location(),
            });
        }
        Ok(self.listing.get_or_init(|| names).clone())
    }

    fn describe(&self, name: &str) -> String {
        match self.transport.fetch_text(&self.settings.manifest_url(name)) {
            Ok(text) => manifest::describe(&text),
            Err(e) => {
                tracing::debug!(bundle = name, error = %e, "no remote description");
                String::new()
            }
        }
    }

    fn stage(&self, name: &str) -> Result<StagedBundle> {
        let scratch = ScratchDir::new(&self.registry)?;
        let archive_path = scratch.path().join("archive.tar.gz");
        {
            let _spinner = Spinner::start(format!("Downloading {}", self.location()));
            self.transport
                .fetch_to_file(&self.settings.archive_url(), &archive_path)?;
        }

        let extract_dir = scratch.path().join("extract");
        let subtree = Path::new(BUNDLES_ROOT).join(name);
        let written = archive::extract_subtree(&archive_path, &subtree, &extract_dir)?;
        if written == 0 {
            tracing::warn!(
                bundle = name,
                "listed in the repository tree but missing from the archive"
            );
            return Err(SkillError::BundleNotFound {
                name: name.to_string(),
            });
        }

        Ok(StagedBundle::scratch(extract_dir, scratch))
    }
}
