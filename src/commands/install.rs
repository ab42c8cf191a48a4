//! Install command implementation
//!
//! Installs the named bundles in order, or asks for a selection when no names
//! are given. The first failure stops the run.

use std::io::{self, BufRead, Write};
use std::path::Path;

use console::Style;

use crate::config::Invocation;
use crate::error::Result;
use crate::installer;
use crate::menu::{self, MenuItem, Selection};
use crate::source::{self, BundleSource};
use crate::temp::CleanupRegistry;

/// Run install command
pub fn run(invocation: &Invocation, registry: &CleanupRegistry) -> Result<()> {
    let mut terminal = if invocation.names.is_empty() {
        Some(menu::open_terminal_input()?)
    } else {
        None
    };

    let source = source::open(&invocation.settings, registry)?;
    let target_root = invocation.target.root()?;

    let names = match terminal.as_mut() {
        Some(input) => {
            let mut stdout = io::stdout();
            match select(source.as_ref(), input.as_mut(), &mut stdout)? {
                Selection::Cancel => {
                    println!("Cancelled.");
                    return Ok(());
                }
                Selection::Bundles(names) => names,
            }
        }
        None => invocation.names.clone(),
    };

    if names.is_empty() {
        println!("No skills selected.");
        return Ok(());
    }

    install_all(source.as_ref(), &names, &target_root)
}

/// Show the menu for every bundle in `source` and read the answer from `input`
pub fn select(
    source: &dyn BundleSource,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Selection> {
    let items: Vec<MenuItem> = source
        .list_bundles()?
        .into_iter()
        .map(|name| MenuItem {
            description: source.describe(&name),
            name,
        })
        .collect();
    menu::prompt(&items, input, out)
}

/// Install `names` in order into `target_root`
pub fn install_all(source: &dyn BundleSource, names: &[String], target_root: &Path) -> Result<()> {
    let check = Style::new().green().bold();
    for name in names {
        let destination = installer::install(source, name, target_root)?;
        println!(
            "{} Installed {} to {}",
            check.apply_to("✓"),
            Style::new().bold().apply_to(name),
            destination.display()
        );
    }
    Ok(())
}
