//! Uninstall command implementation

use console::Style;

use crate::config::Invocation;
use crate::error::{Result, SkillError};
use crate::installer;

/// Run uninstall command
pub fn run(invocation: &Invocation) -> Result<()> {
    if invocation.names.is_empty() {
        return Err(SkillError::MissingArgument {
            message: "--uninstall needs at least one skill name".to_string(),
        });
    }

    let target_root = invocation.target.root()?;
    for name in &invocation.names {
        let removed = installer::uninstall(name, &target_root)?;
        println!(
            "{} Uninstalled {} from {}",
            Style::new().green().bold().apply_to("✓"),
            Style::new().bold().apply_to(name),
            removed.display()
        );
    }
    Ok(())
}
