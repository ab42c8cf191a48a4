//! Interactive bundle selection
//!
//! A numbered list plus `a) all` and `q) quit`, answered with one line of
//! input: `q`, `a`, or space-separated 1-based indices.

use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use console::Style;

use crate::error::{Result, SkillError};
use crate::manifest::{self, MENU_DESCRIPTION_WIDTH};

/// One menu entry
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
}

/// Outcome of the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The user chose to quit
    Cancel,
    /// Chosen bundle names in selection order; may be empty
    Bundles(Vec<String>),
}

/// Print the menu, read one line from `input` and parse it
pub fn prompt(
    items: &[MenuItem],
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Selection> {
    render(items, out)?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    writeln!(out)?;

    let names: Vec<String> = items.iter().map(|item| item.name.clone()).collect();
    parse_selection(&line, &names)
}

fn render(items: &[MenuItem], out: &mut dyn Write) -> Result<()> {
    let index_style = Style::new().cyan();
    let name_style = Style::new().bold();

    writeln!(out, "Available skills:")?;
    writeln!(out)?;
    for (i, item) in items.iter().enumerate() {
        let index = index_style.apply_to(format!("{:>3})", i + 1));
        if item.description.is_empty() {
            writeln!(out, "{index} {}", name_style.apply_to(&item.name))?;
        } else {
            writeln!(
                out,
                "{index} {} - {}",
                name_style.apply_to(&item.name),
                manifest::truncate(&item.description, MENU_DESCRIPTION_WIDTH)
            )?;
        }
    }
    writeln!(out, "{} all", index_style.apply_to("  a)"))?;
    writeln!(out, "{} quit", index_style.apply_to("  q)"))?;
    writeln!(out)?;
    write!(out, "Select skills to install (e.g. 1 3): ")?;
    out.flush()?;
    Ok(())
}

/// Parse one line of menu input against the listed `names`
///
/// Repeated indices select a bundle once, at its first position.
pub fn parse_selection(input: &str, names: &[String]) -> Result<Selection> {
    let trimmed = input.trim();
    match trimmed {
        "q" | "Q" => return Ok(Selection::Cancel),
        "a" | "A" => return Ok(Selection::Bundles(names.to_vec())),
        _ => {}
    }

    let invalid = || SkillError::InvalidSelection {
        input: trimmed.to_string(),
    };
    let mut chosen: Vec<String> = Vec::new();
    for token in trimmed.split_whitespace() {
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: usize = token.parse().map_err(|_| invalid())?;
        if index == 0 || index > names.len() {
            return Err(invalid());
        }
        let name = &names[index - 1];
        if !chosen.contains(name) {
            chosen.push(name.clone());
        }
    }
    Ok(Selection::Bundles(chosen))
}

/// Terminal to read the answer from: stdin if it is a terminal, else the
/// controlling terminal device
pub fn open_terminal_input() -> Result<Box<dyn BufRead>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Box::new(stdin.lock()));
    }

    #[cfg(unix)]
    {
        if let Ok(tty) = std::fs::File::open("/dev/tty") {
            return Ok(Box::new(BufReader::new(tty)));
        }
    }

    Err(SkillError::NoSelection)
}
