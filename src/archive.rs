//! Partial extraction of a branch tarball
//!
//! Branch archives wrap everything in one top-level directory
//! (`<repo>-<branch>/`). That component is stripped before matching entries
//! against the requested subtree.

use std::borrow::Cow;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{Result, SkillError};

/// Extract the entries under `subtree` (e.g. `skills/alpha`) into `destination`
///
/// Returns the number of regular files and symlinks written. Zero means the
/// archive does not contain the subtree. Symlinks are kept when their target
/// stays inside the subtree; other symlinks and all hard links are skipped.
pub fn extract_subtree(archive_path: &Path, subtree: &Path, destination: &Path) -> Result<usize> {
    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut written = 0;

    let entries = archive.entries().map_err(archive_error)?;
    for entry in entries {
        let mut entry = entry.map_err(archive_error)?;
        let entry_type = entry.header().entry_type();
        if entry_type.is_hard_link() {
            tracing::warn!(path = ?entry.path().ok(), "skipping hard link in archive");
            continue;
        }

        let path = entry.path().map_err(archive_error)?.into_owned();
        let Some(stripped) = strip_top_level(&path)? else {
            continue;
        };
        let Ok(relative) = stripped.strip_prefix(subtree) else {
            continue;
        };

        let dest = destination.join(relative);
        if entry_type.is_symlink() {
            let target = entry
                .link_name()
                .map_err(archive_error)?
                .map(Cow::into_owned);
            match target {
                Some(target) if link_stays_inside(relative, &target) => {
                    if let Some(parent) = dest.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    entry.unpack(&dest).map_err(archive_error)?;
                    written += 1;
                }
                _ => {
                    tracing::warn!(path = %path.display(), "skipping symlink leaving the bundle");
                }
            }
            continue;
        }
        if entry_type.is_dir() {
            std::fs::create_dir_all(&dest)?;
            continue;
        }
        if !entry_type.is_file() {
            continue;
        }
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        entry.unpack(&dest).map_err(archive_error)?;
        written += 1;
    }

    tracing::debug!(subtree = %subtree.display(), files = written, "extracted archive subtree");
    Ok(written)
}

/// Whether a symlink at `link` (relative to the subtree) pointing at `target`
/// resolves inside the subtree
fn link_stays_inside(link: &Path, target: &Path) -> bool {
    if link.as_os_str().is_empty() {
        return false;
    }
    let mut depth = link.parent().map_or(0, |p| p.components().count());
    for component in target.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => depth -= 1,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

/// Drop the wrapper directory, rejecting paths that could escape the destination
fn strip_top_level(path: &Path) -> Result<Option<PathBuf>> {
    let stripped: PathBuf = path.components().skip(1).collect();
    if stripped.as_os_str().is_empty() {
        return Ok(None);
    }

    for component in stripped.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(SkillError::Archive {
                    message: format!("unsafe path in archive: {}", path.display()),
                });
            }
        }
    }

    Ok(Some(stripped))
}

fn archive_error(err: std::io::Error) -> SkillError {
    SkillError::Archive {
        message: err.to_string(),
    }
}
