//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects. Diagnostics go through `log`
//! instead; this module is only the user-facing summary.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Clients
//! 001 Black Lotus
//!     Source: black-lotus/
//!     001 Accueil → clients/black-lotus/index.html
//!     002 Contact → clients/black-lotus/contact.html
//! 002 ink co (not built)
//!     Source: ink-co/
//! ```
//!
//! ## Build
//!
//! ```text
//! Built 2 clients (6 pages) → dist
//!     black-lotus
//!     ink-co
//! Base path: /
//! ```
//!
//! ## Add client
//!
//! ```text
//! Created clients/ink-co
//!     Edit clients/ink-co/site.json (contact, artists, colors...)
//!     Then run: vitrine build
//! ```

use crate::config::CONFIG_FILE;
use crate::generate::{BuildReport, CLIENTS_OUT_DIR};
use crate::scaffold::AddedClient;
use crate::naming::display_name;
use crate::scan::ClientEntry;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Path of `path` relative to `root` when possible, for display.
fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Scanned clients with their resolved pages.
pub fn format_check_output(clients: &[ClientEntry], clients_root: &Path) -> Vec<String> {
    if clients.is_empty() {
        return vec!["No clients found".to_string()];
    }
    let mut lines = vec!["Clients".to_string()];
    for (i, entry) in clients.iter().enumerate() {
        let source = format!(
            "{}Source: {}/",
            indent(1),
            display_relative(entry.source_dir(), clients_root)
        );
        let client = match entry {
            ClientEntry::Enabled(client) => client,
            ClientEntry::Disabled { source_dir } => {
                let name = source_dir
                    .file_name()
                    .map(|n| display_name(&n.to_string_lossy()))
                    .unwrap_or_default();
                lines.push(format!("{} {} (not built)", format_index(i + 1), name));
                lines.push(source);
                continue;
            }
        };
        let config = &client.config;
        let status = if config.listed { "" } else { " (unlisted)" };
        lines.push(format!("{} {}{}", format_index(i + 1), config.title, status));
        lines.push(source);
        for (j, page) in config.pages.iter().enumerate() {
            lines.push(format!(
                "{}{} {} → {}/{}/{}",
                indent(1),
                format_index(j + 1),
                page.title,
                CLIENTS_OUT_DIR,
                config.slug,
                page.output_file()
            ));
        }
    }
    lines
}

pub fn print_check_output(clients: &[ClientEntry], clients_root: &Path) {
    for line in format_check_output(clients, clients_root) {
        println!("{}", line);
    }
}

/// Summary of a finished build.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.built.is_empty() {
        lines.push(format!(
            "No clients built, wrote placeholder → {}",
            report.output.display()
        ));
    } else {
        lines.push(format!(
            "Built {} ({}) → {}",
            plural(report.built.len(), "client"),
            plural(report.pages, "page"),
            report.output.display()
        ));
        for slug in &report.built {
            lines.push(format!("{}{}", indent(1), slug));
        }
    }
    lines.push(format!("Base path: {}", report.base_path));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

/// Confirmation after `add-client`.
pub fn format_add_client_output(added: &AddedClient, root: &Path) -> Vec<String> {
    let dir = display_relative(&added.dir, root);
    let mut lines = vec![format!("Created {}", dir)];
    if added.from_starter {
        lines.push(format!("{}Copied from the starter client", indent(1)));
    }
    lines.push(format!(
        "{}Edit {}/{} (contact, artists, colors...)",
        indent(1),
        dir,
        CONFIG_FILE
    ));
    lines.push(format!("{}Then run: vitrine build", indent(1)));
    lines
}

pub fn print_add_client_output(added: &AddedClient, root: &Path) {
    for line in format_add_client_output(added, root) {
        println!("{}", line);
    }
}
