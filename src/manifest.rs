//! Description extraction from SKILL.md manifests
//!
//! This is a field heuristic, not a YAML parser: find the `description:` line,
//! follow space-indented continuation lines, collapse whitespace. Anything it
//! cannot make sense of yields an empty description.

/// Display cap for descriptions in the list view
pub const LIST_DESCRIPTION_WIDTH: usize = 60;

/// Display cap for descriptions in the interactive menu
pub const MENU_DESCRIPTION_WIDTH: usize = 50;

const FIELD: &str = "description:";
const ELLIPSIS: &str = "...";

/// Extract the single-line description from manifest text
pub fn describe(manifest: &str) -> String {
    let mut lines = manifest.lines();
    let Some(first) = lines.by_ref().find_map(|line| line.strip_prefix(FIELD)) else {
        return String::new();
    };

    let mut value = String::new();
    if !is_block_indicator(first.trim()) {
        value.push_str(first);
    }
    for line in lines.take_while(|line| line.starts_with(' ')) {
        value.push(' ');
        value.push_str(line);
    }

    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `>`, `|` and their chomping variants introduce a block with no inline text
fn is_block_indicator(value: &str) -> bool {
    matches!(value, ">" | "|" | ">-" | "|-" | ">+" | "|+")
}

/// Cut `text` to `cap` characters plus an ellipsis when it is longer
pub fn truncate(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((end, _)) => format!("{}{ELLIPSIS}", &text[..end]),
        None => text.to_string(),
    }
}
