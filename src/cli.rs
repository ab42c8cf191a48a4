//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::config::{DEFAULT_BRANCH, DEFAULT_REPOSITORY, Repository};

/// skill-install - install SKILL.md bundles
///
/// Install, list and uninstall skill bundles in the project or the user directory.
#[derive(Parser, Debug)]
#[command(
    name = "skill-install",
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install skill bundles into .claude/skills",
    long_about = "Installs skill bundles (directories with a SKILL.md) from a local checkout \
                  or from the remote repository archive into ./.claude/skills, or into \
                  ~/.claude/skills with --global. Without skill names an interactive menu \
                  is shown.",
    after_help = "Examples:\n   \
                  skill-install                     # Pick skills from a menu\n   \
                  skill-install alpha beta          # Install two skills into ./.claude/skills\n   \
                  skill-install -g alpha            # Install into ~/.claude/skills\n   \
                  skill-install -l                  # List the available skills\n   \
                  skill-install -u alpha            # Remove an installed skill"
)]
pub struct Cli {
    /// Use the user-global directory (~/.claude/skills) instead of ./.claude/skills
    #[arg(long, short = 'g')]
    pub global: bool,

    /// List the available skills
    #[arg(long, short = 'l', conflicts_with = "uninstall")]
    pub list: bool,

    /// Uninstall the named skills
    #[arg(long, short = 'u')]
    pub uninstall: bool,

    /// Read skills from this local source tree instead of detecting one
    #[arg(long, value_name = "DIR", env = "SKILL_INSTALL_SOURCE")]
    pub source_dir: Option<PathBuf>,

    /// Remote repository to fetch skills from
    #[arg(
        long,
        value_name = "OWNER/NAME",
        env = "SKILL_INSTALL_REPO",
        default_value = DEFAULT_REPOSITORY,
    )]
    pub repo: Repository,

    /// Remote branch to fetch skills from
    #[arg(
        long,
        value_name = "BRANCH",
        env = "SKILL_INSTALL_BRANCH",
        default_value = DEFAULT_BRANCH,
    )]
    pub branch: String,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Skill names
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,
}
