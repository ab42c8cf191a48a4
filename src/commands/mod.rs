//! Command implementations for the skill-install CLI

pub mod install;
pub mod list;
pub mod uninstall;

use crate::config::{Action, Invocation};
use crate::error::Result;
use crate::temp::CleanupRegistry;

/// Run the action selected on the command line
pub fn run(invocation: &Invocation, registry: &CleanupRegistry) -> Result<()> {
    match invocation.action {
        Action::Install => install::run(invocation, registry),
        Action::List => list::run(invocation, registry),
        Action::Uninstall => uninstall::run(invocation),
    }
}
