//! Common test utilities for skill-install integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A source checkout, a project directory and a home directory in one temp dir
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Source tree holding `skills/<name>/`
    pub source: PathBuf,
    /// Working directory of the command (local target base)
    pub project: PathBuf,
    /// Home directory of the command (global target base)
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let source = temp.path().join("source");
        let project = temp.path().join("project");
        let home = temp.path().join("home");
        for dir in [&source, &project, &home] {
            std::fs::create_dir_all(dir).expect("Failed to create workspace directory");
        }
        Self {
            temp,
            source,
            project,
            home,
        }
    }

    /// Create a bundle with the given SKILL.md content
    pub fn create_bundle(&self, name: &str, manifest: &str) -> PathBuf {
        let bundle_path = self.source.join("skills").join(name);
        std::fs::create_dir_all(&bundle_path).expect("Failed to create bundle directory");
        std::fs::write(bundle_path.join("SKILL.md"), manifest).expect("Failed to write SKILL.md");
        bundle_path
    }

    /// Write a file below the source tree
    pub fn write_source_file(&self, path: &str, content: &[u8]) {
        let file_path = self.source.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Local install root
    pub fn local_target(&self) -> PathBuf {
        self.project.join(".claude/skills")
    }

    /// Global install root
    pub fn global_target(&self) -> PathBuf {
        self.home.join(".claude/skills")
    }

    /// Command running in the project directory against the local source
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(skill_install_bin());
        cmd.current_dir(&self.project)
            .env_remove("SKILL_INSTALL_REPO")
            .env_remove("SKILL_INSTALL_BRANCH")
            .env_remove("SKILL_INSTALL_LOG")
            .env("SKILL_INSTALL_SOURCE", &self.source)
            .env("HOME", &self.home);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Path to the skill-install binary
pub fn skill_install_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_skill-install"))
}

/// Names of the entries directly under `dir`, sorted
#[allow(dead_code)]
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| {
            e.expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Relative path and contents of every file under `root`, sorted
#[allow(dead_code)]
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    collect_files(root, root, &mut files);
    files.sort();
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<(PathBuf, Vec<u8>)>) {
    for entry in std::fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).expect("path under root").to_path_buf();
            files.push((relative, std::fs::read(&path).expect("Failed to read file")));
        }
    }
}
