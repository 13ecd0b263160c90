//! CLI output formatting.
//!
//! Display is information-centric: pages show as positional index + title
//! with the generated filename as trailing context, so the output reads as a
//! site inventory rather than a file listing.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::model::{SiteConfig, Validation};
use crate::render::SiteBundle;
use crate::theme;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Export listing: home, one line per page, then the bundled extras.
///
/// ```text
/// Home → index.html
/// 001 About → 1712000000000.html
/// 002 Contact → 1712000000001.html
///     README.md
///     site-config.json
/// Exported 5 files
/// ```
pub fn format_export_output(config: &SiteConfig, bundle: &SiteBundle) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];
    for (pos, page) in config.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}.html",
            format_index(pos + 1),
            page.title,
            page.id
        ));
    }
    for extra in ["README.md", "site-config.json"] {
        if bundle.contains_key(extra) {
            lines.push(format!("    {extra}"));
        }
    }
    lines.push(format!("Exported {} files", bundle.len()));
    lines
}

/// Validation report: one line per missing field, or a single all-clear.
pub fn format_check_output(validation: &Validation) -> Vec<String> {
    if validation.is_valid {
        return vec!["Site configuration is valid".to_string()];
    }
    let mut lines = vec!["Missing required fields:".to_string()];
    for field in &validation.missing_fields {
        lines.push(format!("    {field}"));
    }
    lines
}

/// Theme listing, default marked.
pub fn format_themes_output() -> Vec<String> {
    theme::theme_ids()
        .iter()
        .map(|id| {
            if *id == crate::model::DEFAULT_THEME {
                format!("{id} (default)")
            } else {
                (*id).to_string()
            }
        })
        .collect()
}

pub fn print_export_output(config: &SiteConfig, bundle: &SiteBundle) {
    for line in format_export_output(config, bundle) {
        println!("{line}");
    }
}

pub fn print_check_output(validation: &Validation) {
    for line in format_check_output(validation) {
        println!("{line}");
    }
}

pub fn print_themes_output() {
    for line in format_themes_output() {
        println!("{line}");
    }
}
