//! Common file system operations with unified error handling

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SkillError};

/// Copy a directory tree, preserving file contents byte for byte
///
/// Directories are created as needed. Symlinks are recreated with the same
/// target, including links whose target does not exist.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).map_err(|e| SkillError::Io {
            message: format!("{}: {e}", entry.path().display()),
        })?;
        let dst_path = dst.join(relative);

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            copy_symlink(entry.path(), &dst_path)?;
        } else if file_type.is_dir() {
            fs::create_dir_all(&dst_path)?;
        } else {
            fs::copy(entry.path(), &dst_path)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(link)?;
    std::os::unix::fs::symlink(target, dst)?;
    Ok(())
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, dst: &Path) -> Result<()> {
    if link.is_dir() {
        copy_dir_recursive(link, dst)
    } else if link.exists() {
        fs::copy(link, dst)?;
        Ok(())
    } else {
        tracing::warn!(path = %link.display(), "skipping broken link");
        Ok(())
    }
}

/// Replace `dst` with a copy of `src`
///
/// Any existing `dst` is removed first, so a failure during the copy leaves
/// the destination absent or partial but never mixed with stale files.
pub fn replace_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_disjoint(src, dst)?;
    match fs::symlink_metadata(dst) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dst)?,
        Ok(_) => fs::remove_file(dst)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    copy_dir_recursive(src, dst)
}

/// Fail when either path lies inside the other
pub fn ensure_disjoint(src: &Path, dst: &Path) -> Result<()> {
    let src_abs = resolve(src);
    let dst_abs = resolve(dst);
    if dst_abs.starts_with(&src_abs) || src_abs.starts_with(&dst_abs) {
        return Err(SkillError::OverlappingPaths {
            origin: src_abs.display().to_string(),
            destination: dst_abs.display().to_string(),
        });
    }
    Ok(())
}

/// Canonicalize the longest existing prefix of `path` and append the rest
fn resolve(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = dunce::canonicalize(existing) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return path.to_path_buf(),
        }
    }
}
