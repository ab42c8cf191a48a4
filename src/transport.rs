//! HTTP transport
//!
//! Plain GET requests delegated to an external client program. The program
//! is located once when the remote source is built; a missing client is a
//! [`SkillError::Network`] at that point rather than on first use.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Result, SkillError};

/// Fetches URLs either as text or into a file
pub trait Transport {
    /// Return the response body as text
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Write the response body to `destination`
    fn fetch_to_file(&self, url: &str, destination: &Path) -> Result<()>;
}

/// External HTTP client used for requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBackend {
    Curl(PathBuf),
    Wget(PathBuf),
}

impl HttpBackend {
    /// Locate curl, falling back to wget
    pub fn detect() -> Result<Self> {
        let backend = Self::from_lookup(|program| which::which(program).ok())?;
        tracing::debug!(?backend, "selected HTTP backend");
        Ok(backend)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<PathBuf>) -> Result<Self> {
        if let Some(path) = lookup("curl") {
            return Ok(HttpBackend::Curl(path));
        }
        if let Some(path) = lookup("wget") {
            return Ok(HttpBackend::Wget(path));
        }
        Err(SkillError::Network {
            message: "neither curl nor wget is available".to_string(),
        })
    }

    fn command(&self, url: &str, destination: Option<&Path>) -> Command {
        match self {
            HttpBackend::Curl(program) => {
                let mut cmd = Command::new(program);
                cmd.arg("-fsSL");
                if let Some(dest) = destination {
                    cmd.arg("-o").arg(dest);
                }
                cmd.arg(url);
                cmd
            }
            HttpBackend::Wget(program) => {
                let mut cmd = Command::new(program);
                cmd.arg("-q").arg("-O");
                match destination {
                    Some(dest) => cmd.arg(dest),
                    None => cmd.arg("-"),
                };
                cmd.arg(url);
                cmd
            }
        }
    }

    fn run(&self, url: &str, destination: Option<&Path>) -> Result<Output> {
        tracing::debug!(%url, "GET");
        let output = self
            .command(url, destination)
            .output()
            .map_err(|e| SkillError::Network {
                message: format!("failed to run HTTP client: {e}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr.trim();
            return Err(SkillError::Network {
                message: if detail.is_empty() {
                    format!("request to {url} failed ({})", output.status)
                } else {
                    format!("request to {url} failed: {detail}")
                },
            });
        }
        Ok(output)
    }
}

impl Transport for HttpBackend {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let output = self.run(url, None)?;
        String::from_utf8(output.stdout).map_err(|e| SkillError::Network {
            message: format!("response from {url} is not UTF-8: {e}"),
        })
    }

    fn fetch_to_file(&self, url: &str, destination: &Path) -> Result<()> {
        self.run(url, Some(destination))?;
        Ok(())
    }
}
