//! Invocation settings
//!
//! The parsed command line is turned into one immutable [`Invocation`] that is
//! passed explicitly to every command. Nothing here reads process state except
//! [`InstallTarget::root`], which needs the home or working directory.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::Cli;
use crate::error::{Result, SkillError};

/// Directory holding the bundles inside a source tree or archive
pub const BUNDLES_ROOT: &str = "skills";

/// File whose presence marks a directory as a bundle
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Repository used when none is configured
pub const DEFAULT_REPOSITORY: &str = "skill-install/skills";

/// Branch used when none is configured
pub const DEFAULT_BRANCH: &str = "main";

/// Install directory relative to the target base (home or working directory)
const TARGET_SUBDIR: &str = ".claude/skills";

/// Remote repository coordinates (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = SkillError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || SkillError::InvalidRepository {
            value: value.to_string(),
        };
        let (owner, name) = value.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Where bundles come from
#[derive(Debug, Clone)]
pub struct Settings {
    pub repository: Repository,
    pub branch: String,
    /// Explicit local source tree; forces local mode when set
    pub source_dir: Option<PathBuf>,
}

impl Settings {
    /// Repository tree listing (recursive) for the configured branch
    pub fn tree_url(&self) -> String {
        format!(
            "https://api.github.com/repos/{}/{}/git/trees/{}?recursive=1",
            self.repository.owner, self.repository.name, self.branch
        )
    }

    /// Tarball of the whole branch
    pub fn archive_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/archive/refs/heads/{}.tar.gz",
            self.repository.owner, self.repository.name, self.branch
        )
    }

    /// Raw manifest of a single bundle
    pub fn manifest_url(&self, bundle: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{BUNDLES_ROOT}/{bundle}/{MANIFEST_FILE}",
            self.repository.owner, self.repository.name, self.branch
        )
    }
}

/// Installation target root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallTarget {
    /// `<home>/.claude/skills`
    Global,
    /// `<cwd>/.claude/skills`
    Local,
}

impl InstallTarget {
    /// Resolve the target root directory
    pub fn root(self) -> Result<PathBuf> {
        match self {
            InstallTarget::Global => {
                let home = dirs::home_dir().ok_or(SkillError::HomeDirNotFound)?;
                Ok(Self::root_in(&home))
            }
            InstallTarget::Local => {
                let cwd = std::env::current_dir().map_err(|e| SkillError::Io {
                    message: format!("Failed to get current directory: {e}"),
                })?;
                Ok(Self::root_in(&cwd))
            }
        }
    }

    fn root_in(base: &Path) -> PathBuf {
        base.join(TARGET_SUBDIR)
    }
}

/// Action selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    List,
    Uninstall,
}

/// Parsed command line, produced once in `main`
#[derive(Debug, Clone)]
pub struct Invocation {
    pub action: Action,
    pub target: InstallTarget,
    pub names: Vec<String>,
    pub settings: Settings,
}

impl From<Cli> for Invocation {
    fn from(cli: Cli) -> Self {
        let action = if cli.list {
            Action::List
        } else if cli.uninstall {
            Action::Uninstall
        } else {
            Action::Install
        };
        let target = if cli.global {
            InstallTarget::Global
        } else {
            InstallTarget::Local
        };

        Self {
            action,
            target,
            names: cli.names,
            settings: Settings {
                repository: cli.repo,
                branch: cli.branch,
                source_dir: cli.source_dir,
            },
        }
    }
}
