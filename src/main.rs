//! skill-install - installer for SKILL.md skill bundles
//!
//! Lists, installs and uninstalls skill bundles from a local checkout or the remote
//! repository archive, into `./.claude/skills` or `~/.claude/skills`.

use clap::Parser;
use clap::error::{ContextKind, ErrorKind};
use tracing_subscriber::EnvFilter;

mod archive;
mod cli;
mod commands;
mod common;
mod config;
mod error;
mod installer;
mod manifest;
mod menu;
mod progress;
mod signals;
mod source;
mod temp;
#[cfg(test)]
mod test_fixtures;
mod transport;

use cli::Cli;
use config::Invocation;
use error::SkillError;
use temp::CleanupRegistry;

/// Environment variable holding a tracing filter, e.g. `skill_install=debug`
const LOG_ENV: &str = "SKILL_INSTALL_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn fail(err: &SkillError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// Parse arguments, reporting unknown options with our own error
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::UnknownArgument => {
            let option = e
                .get(ContextKind::InvalidArg)
                .map(ToString::to_string)
                .unwrap_or_default();
            fail(&SkillError::UnknownOption { option })
        }
        Err(e) => e.exit(),
    }
}

fn main() {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let registry = CleanupRegistry::new();
    if let Err(e) = signals::install_cleanup_handler(&registry) {
        tracing::warn!(error = %e, "could not install signal handlers");
    }

    let invocation = Invocation::from(cli);
    tracing::debug!(?invocation, "parsed arguments");

    if let Err(e) = commands::run(&invocation, &registry) {
        fail(&e);
    }
}
