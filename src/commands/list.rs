//! List command implementation
//!
//! Prints every available bundle with its truncated description.

use std::io::{self, Write};

use console::Style;

use crate::config::Invocation;
use crate::error::Result;
use crate::manifest::{self, LIST_DESCRIPTION_WIDTH};
use crate::source::{self, BundleSource};
use crate::temp::CleanupRegistry;

/// Run list command
pub fn run(invocation: &Invocation, registry: &CleanupRegistry) -> Result<()> {
    let source = source::open(&invocation.settings, registry)?;
    let mut stdout = io::stdout().lock();
    write_list(source.as_ref(), &mut stdout)
}

/// Write the bundle list of `source` to `out`
pub fn write_list(source: &dyn BundleSource, out: &mut dyn Write) -> Result<()> {
    let names = source.list_bundles()?;
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let name_style = Style::new().bold().yellow();

    writeln!(out, "Available skills ({}):", source.location())?;
    writeln!(out)?;
    for name in &names {
        let description = source.describe(name);
        if description.is_empty() {
            writeln!(out, "  {}", name_style.apply_to(name))?;
        } else {
            writeln!(
                out,
                "  {}  {}",
                name_style.apply_to(format!("{name:<width$}")),
                manifest::truncate(&description, LIST_DESCRIPTION_WIDTH)
            )?;
        }
    }
    Ok(())
}
