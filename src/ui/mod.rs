//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_available_versions, display_boundary_warning, display_error,
    display_rate_limit_notice, display_release_notes, display_status, display_success,
};

/// Prompts user to pick a version endpoint from the available tags.
///
/// Displays a numbered list and accepts a 1-based index or a literal tag name.
/// Pressing Enter picks `default_index` (1-based).
///
/// # Arguments
/// * `label` - What is being selected (e.g. "from version")
/// * `versions` - Selectable tag names
/// * `default_index` - 1-based index used on empty input
///
/// # Returns
/// * `Ok(String)` - The selected tag
/// * `Err` - If there is nothing to select or the selection is invalid
pub fn select_version(label: &str, versions: &[String], default_index: usize) -> Result<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    select_version_from(&mut input, &mut output, label, versions, default_index)
}

/// [`select_version`] over arbitrary reader/writer, for testing.
pub fn select_version_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    versions: &[String],
    default_index: usize,
) -> Result<String> {
    if versions.is_empty() {
        return Err(anyhow::anyhow!("No versions available to select a {}", label));
    }

    writeln!(output, "\n{}:", console::style(format!("Select a {}", label)).bold())?;
    for (i, version) in versions.iter().enumerate() {
        writeln!(output, "  {}. {}", i + 1, version)?;
    }

    let default_index = default_index.clamp(1, versions.len());
    write!(
        output,
        "\n{} (1-{}) [default: {}]: ",
        label,
        versions.len(),
        default_index
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let selection = line.trim();

    if selection.is_empty() {
        return Ok(versions[default_index - 1].clone());
    }
    if let Some(tag) = versions.iter().find(|v| v.as_str() == selection) {
        return Ok(tag.clone());
    }
    match selection.parse::<usize>() {
        Ok(index) if index > 0 && index <= versions.len() => Ok(versions[index - 1].clone()),
        _ => Err(anyhow::anyhow!("Invalid {} selection: '{}'", label, selection)),
    }
}
