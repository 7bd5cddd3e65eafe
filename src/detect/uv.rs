//! `uv tool list --show-paths` output parsing.

use crate::core::types::{InstalledPackage, Manager};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

// Package lines look like:
//   ruff v0.4.4 (path: /home/user/.local/share/uv/tools/ruff)
// Entry-point sublines ("- ruff (...)") and anything else fall through.
static PACKAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+v(\S+)\s+\(path:\s*(.+)\)$").expect("uv listing pattern is valid")
});

/// Parse the full listing, skipping malformed lines one by one.
pub fn parse_listing(output: &str) -> Vec<InstalledPackage> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<InstalledPackage> {
    let caps = PACKAGE_LINE.captures(line.trim())?;

    Some(InstalledPackage {
        name: caps[1].to_string(),
        path: PathBuf::from(caps[3].trim()),
        manager: Manager::Uv,
        version: Some(caps[2].to_string()),
        commands: None,
    })
}
