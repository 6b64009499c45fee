//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! `format_*` functions build strings and are testable; `display_*` functions print them.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::Release;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Reminder shown when running without a token.
pub fn display_rate_limit_notice() {
    eprintln!(
        "{} Unauthenticated requests are limited to 60 per hour. Pass --token or set GITHUB_TOKEN to raise the limit.",
        style("→").yellow()
    );
}

/// Header line for a release: tag, publish date and pre-release marker.
pub fn format_release_header(release: &Release) -> String {
    let mut header = style(&release.tag_name).bold().to_string();
    if let Some(published) = release.published_date {
        header.push_str(&format!("  {}", published.format("%Y-%m-%d")));
    }
    if release.pre_release {
        header.push_str(&format!("  {}", style("[Pre-release]").yellow()));
    }
    header
}

/// Full block for one release. The body is passed through verbatim.
pub fn format_release(release: &Release) -> String {
    let mut block = format_release_header(release);
    if !release.html_url.is_empty() {
        block.push('\n');
        block.push_str(&style(&release.html_url).cyan().underlined().to_string());
    }
    let notes = release.notes();
    if !notes.is_empty() {
        block.push_str("\n\n");
        block.push_str(notes);
    }
    block
}

/// Print all releases separated by rules, with a count summary.
pub fn display_release_notes(releases: &[Release]) {
    for release in releases {
        println!("{}", style("─".repeat(60)).dim());
        println!("{}\n", format_release(release));
    }
    display_success(&format!(
        "{} release{} shown",
        releases.len(),
        if releases.len() == 1 { "" } else { "s" }
    ));
}

/// Display the tags that can be used as range endpoints.
pub fn display_available_versions(versions: &[String]) {
    println!("{}", style("Available versions:").bold());
    for version in versions {
        println!("  - {}", version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn release() -> Release {
        Release::new(
            "v0.72.0",
            "https://github.com/facebook/react-native/releases/tag/v0.72.0",
            Some("0.72.0".to_string()),
            Some("## Breaking\n- **Removed** `foo`".to_string()),
            true,
            Some(Utc.with_ymd_and_hms(2023, 6, 21, 16, 9, 20).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_format_release_header() {
        let header = format_release_header(&release());
        assert!(header.contains("v0.72.0"));
        assert!(header.contains("2023-06-21"));
        assert!(header.contains("[Pre-release]"));
    }

    #[test]
    fn test_format_release_keeps_body_verbatim() {
        let block = format_release(&release());
        assert!(block.contains("## Breaking\n- **Removed** `foo`"));
        assert!(block.contains("https://github.com/facebook/react-native/releases/tag/v0.72.0"));
    }

    #[test]
    fn test_format_release_without_optional_parts() {
        let bare = Release::new("v1.0.0", "", None, None, false, None).unwrap();
        let block = format_release(&bare);
        assert!(block.contains("v1.0.0"));
        assert!(!block.contains("Pre-release"));
        assert!(!block.contains('\n'));
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }
}
