//! Installing bundles into and removing them from a target root

use std::path::{Component, Path, PathBuf};

use crate::common::fs::{ensure_disjoint, replace_dir};
use crate::error::{Result, SkillError};
use crate::source::BundleSource;

/// Copy bundle `name` from `source` into `target_root/name`
///
/// Returns the destination directory. Any previous copy is removed first.
pub fn install(source: &dyn BundleSource, name: &str, target_root: &Path) -> Result<PathBuf> {
    source.validate(name)?;
    let staged = source.stage(name)?;
    let destination = target_root.join(name);
    ensure_disjoint(&staged.path, &destination)?;

    std::fs::create_dir_all(target_root)?;
    replace_dir(&staged.path, &destination)?;

    tracing::debug!(bundle = name, destination = %destination.display(), "installed");
    Ok(destination)
}

/// Remove `target_root/name`
///
/// Returns the removed directory.
pub fn uninstall(name: &str, target_root: &Path) -> Result<PathBuf> {
    let not_installed = || SkillError::NotInstalled {
        name: name.to_string(),
        target: target_root.display().to_string(),
    };
    if !is_plain_name(name) {
        return Err(not_installed());
    }

    let destination = target_root.join(name);
    if !destination.is_dir() {
        return Err(not_installed());
    }
    std::fs::remove_dir_all(&destination)?;

    tracing::debug!(bundle = name, destination = %destination.display(), "uninstalled");
    Ok(destination)
}

/// Exactly one normal path component, so `target_root/name` stays inside the target
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LocalSource;
    use crate::test_fixtures::{create_source_tree, create_temp_dir};
    use walkdir::WalkDir;

    /// Relative path and contents of every file under `root`
    fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<_> = WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                (
                    e.path().strip_prefix(root).unwrap().to_path_buf(),
                    std::fs::read(e.path()).unwrap(),
                )
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_install_copies_identical_tree() {
        let (_src, root) = create_source_tree(&[("alpha", "description: A\n")]);
        std::fs::create_dir_all(root.join("skills/alpha/scripts")).unwrap();
        std::fs::write(root.join("skills/alpha/scripts/run.py"), b"print(1)\n").unwrap();
        std::fs::write(root.join("skills/alpha/.config"), [0u8, 255, 7]).unwrap();

        let target = create_temp_dir();
        let source = LocalSource::new(&root);
        let dest = install(&source, "alpha", target.path()).unwrap();

        assert_eq!(dest, target.path().join("alpha"));
        assert_eq!(snapshot(&dest), snapshot(&root.join("skills/alpha")));
    }

    #[test]
    fn test_install_overwrites_previous_copy() {
        let (_src, root) = create_source_tree(&[("alpha", "description: new\n")]);
        let target = create_temp_dir();
        std::fs::create_dir_all(target.path().join("alpha")).unwrap();
        std::fs::write(target.path().join("alpha/stale.md"), "old").unwrap();

        install(&LocalSource::new(&root), "alpha", target.path()).unwrap();

        assert!(!target.path().join("alpha/stale.md").exists());
        assert_eq!(
            std::fs::read_to_string(target.path().join("alpha/SKILL.md")).unwrap(),
            "description: new\n"
        );
    }

    #[test]
    fn test_install_creates_missing_target_root() {
        let (_src, root) = create_source_tree(&[("alpha", "description: A\n")]);
        let target = create_temp_dir();
        let target_root = target.path().join(".claude/skills");

        install(&LocalSource::new(&root), "alpha", &target_root).unwrap();
        assert!(target_root.join("alpha/SKILL.md").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_preserves_symlinks() {
        let (_src, root) = create_source_tree(&[("alpha", "description: A\n")]);
        let bundle = root.join("skills/alpha");
        std::os::unix::fs::symlink("SKILL.md", bundle.join("link.md")).unwrap();
        std::os::unix::fs::symlink("missing.md", bundle.join("dangling.md")).unwrap();
        let target = create_temp_dir();

        let dest = install(&LocalSource::new(&root), "alpha", target.path()).unwrap();

        for (link, points_to) in [("link.md", "SKILL.md"), ("dangling.md", "missing.md")] {
            let path = dest.join(link);
            assert!(std::fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
            assert_eq!(std::fs::read_link(&path).unwrap(), Path::new(points_to));
        }
    }

    #[test]
    fn test_install_into_own_source_is_rejected() {
        let (_src, root) = create_source_tree(&[("alpha", "description: A\n")]);
        let bundle = root.join("skills/alpha");
        let before = snapshot(&bundle);

        let err = install(&LocalSource::new(&root), "alpha", &bundle.join(".claude/skills"))
            .unwrap_err();

        assert!(matches!(err, SkillError::OverlappingPaths { .. }));
        assert!(!bundle.join(".claude").exists());
        assert_eq!(snapshot(&bundle), before);
    }

    #[test]
    fn test_install_unknown_bundle_fails_without_touching_target() {
        let (_src, root) = create_source_tree(&[("alpha", "description: A\n")]);
        let target = create_temp_dir();

        let err = install(&LocalSource::new(&root), "gamma", target.path()).unwrap_err();
        assert!(matches!(err, SkillError::BundleNotFound { .. }));
        assert!(!target.path().join("gamma").exists());
    }

    #[test]
    fn test_install_then_uninstall_leaves_rest_of_target() {
        let (_src, root) = create_source_tree(&[
            ("alpha", "description: A\n"),
            ("beta", "description: B\n"),
        ]);
        let target = create_temp_dir();
        std::fs::write(target.path().join("notes.txt"), "keep").unwrap();
        let source = LocalSource::new(&root);
        install(&source, "beta", target.path()).unwrap();
        let before = snapshot(target.path());

        install(&source, "alpha", target.path()).unwrap();
        let removed = uninstall("alpha", target.path()).unwrap();

        assert_eq!(removed, target.path().join("alpha"));
        assert!(!target.path().join("alpha").exists());
        assert_eq!(snapshot(target.path()), before);
    }

    #[test]
    fn test_uninstall_not_installed() {
        let target = create_temp_dir();
        std::fs::write(target.path().join("other.md"), "x").unwrap();
        let before = snapshot(target.path());

        let err = uninstall("alpha", target.path()).unwrap_err();
        assert!(matches!(err, SkillError::NotInstalled { .. }));
        assert_eq!(snapshot(target.path()), before);
    }

    #[test]
    fn test_uninstall_rejects_paths_outside_target() {
        let temp = create_temp_dir();
        let target = temp.path().join("skills");
        std::fs::create_dir_all(target.join("alpha")).unwrap();

        for name in ["..", "../skills", "alpha/..", "", "/tmp", "."] {
            let err = uninstall(name, &target).unwrap_err();
            assert!(matches!(err, SkillError::NotInstalled { .. }), "{name:?}");
        }
        assert!(target.join("alpha").is_dir());
    }

    #[test]
    fn test_uninstall_file_is_not_installed() {
        let target = create_temp_dir();
        std::fs::write(target.path().join("alpha"), "not a dir").unwrap();

        let err = uninstall("alpha", target.path()).unwrap_err();
        assert!(matches!(err, SkillError::NotInstalled { .. }));
        assert!(target.path().join("alpha").is_file());
    }
}
