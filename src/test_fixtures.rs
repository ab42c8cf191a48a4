//! Test fixtures shared by unit tests.
//!
//! Provides source trees with bundles, branch tarballs and an in-memory
//! [`Transport`] so remote code paths run without a network.
//!
//! ```ignore
//! use crate::test_fixtures::{create_source_tree, FakeTransport};
//!
//! let (temp, root) = create_source_tree(&[("alpha", "description: A")]);
//! let transport = FakeTransport::new().with_text(url, body);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

use crate::error::{Result, SkillError};
use crate::transport::Transport;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Create a source tree with `skills/<name>/SKILL.md` for each entry.
///
/// # Panics
///
/// Panics if a file cannot be written.
#[must_use]
pub fn create_source_tree(bundles: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let root = temp.path().to_path_buf();
    for (name, manifest) in bundles {
        let dir = root.join("skills").join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create bundle directory");
        std::fs::write(dir.join("SKILL.md"), manifest).expect("Failed to write SKILL.md");
    }
    (temp, root)
}

/// Write a gzipped tarball containing the given regular files.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn build_tarball(path: &Path, files: &[(&str, &[u8])]) {
    build_tarball_with_links(path, files, &[]);
}

/// Write a gzipped tarball with regular files followed by `(path, target)` symlinks.
///
/// # Panics
///
/// Panics if the archive cannot be written.
pub fn build_tarball_with_links(path: &Path, files: &[(&str, &[u8])], links: &[(&str, &str)]) {
    let file = File::create(path).expect("Failed to create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        builder
            .append_data(&mut header, name, *data)
            .expect("Failed to append archive entry");
    }
    for (name, target) in links {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        builder
            .append_link(&mut header, name, target)
            .expect("Failed to append archive link");
    }
    builder
        .into_inner()
        .and_then(GzEncoder::finish)
        .expect("Failed to finish archive");
}

/// Canned responses keyed by URL
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, url: impl Into<String>, body: &str) -> Self {
        self.responses.insert(url.into(), body.as_bytes().to_vec());
        self
    }

    #[must_use]
    pub fn with_bytes(mut self, url: impl Into<String>, body: Vec<u8>) -> Self {
        self.responses.insert(url.into(), body);
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn lookup(&self, url: &str) -> Result<&Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses.get(url).ok_or_else(|| SkillError::Network {
            message: format!("request to {url} failed: 404"),
        })
    }
}

impl Transport for FakeTransport {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let body = self.lookup(url)?;
        Ok(String::from_utf8_lossy(body).into_owned())
    }

    fn fetch_to_file(&self, url: &str, destination: &Path) -> Result<()> {
        let body = self.lookup(url)?;
        std::fs::write(destination, body)?;
        Ok(())
    }
}
