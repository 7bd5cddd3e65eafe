//! Completion support classification.
//!
//! Decides, per installed package, which completion mechanism its
//! environment supports and which executable entry points completions
//! should be generated for. Probes never fail a run: every timeout,
//! non-zero exit, or missing file is a negative result.

use crate::constants::{EXCLUDED_COMMANDS, EXCLUDED_COMMAND_PREFIXES, PROBE_TIMEOUT, RUNTIME_BIN};
use crate::core::types::{CompletionPackage, CompletionType, InstalledPackage};
use crate::exec;
use crate::ui;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Classify every package, dropping those without completion support.
/// Packages are independent, so classification fans out on the rayon
/// pool; output order follows input order either way.
pub fn analyze_packages(packages: Vec<InstalledPackage>) -> Vec<CompletionPackage> {
    if packages.len() <= 1 {
        packages.into_iter().filter_map(analyze_package).collect()
    } else {
        packages
            .into_par_iter()
            .filter_map(analyze_package)
            .collect()
    }
}

/// Classify a single package. `None` means no usable mechanism or no
/// resolvable commands; the package simply drops out of the pipeline.
pub fn analyze_package(package: InstalledPackage) -> Option<CompletionPackage> {
    let completion_type = detect_completion_type(&package)?;

    let commands = find_package_commands(&package);
    if commands.is_empty() {
        return None;
    }

    ui::debug(&format!(
        "{} ({}) supports {} completions via {}",
        package.name,
        package.manager,
        completion_type,
        commands.join(", ")
    ));

    Some(CompletionPackage {
        package,
        completion_type,
        commands,
    })
}

// Probe order is the priority order: a package with both click and
// argcomplete importable is classified as click.
fn detect_completion_type(package: &InstalledPackage) -> Option<CompletionType> {
    let runtime = runtime_path(package)?;

    if has_dependency(&runtime, "click") {
        return Some(CompletionType::Click);
    }
    if has_dependency(&runtime, "argcomplete") {
        return Some(CompletionType::Argcomplete);
    }

    ui::debug(&format!("{}: no completion mechanism found", package.name));
    None
}

/// The environment's interpreter at the fixed `<env-root>/bin/python`
/// location. Absent interpreter means the package cannot be classified.
fn runtime_path(package: &InstalledPackage) -> Option<PathBuf> {
    let runtime = package.bin_dir().join(RUNTIME_BIN);
    runtime.exists().then_some(runtime)
}

fn has_dependency(runtime: &Path, dependency: &str) -> bool {
    let mut cmd = Command::new(runtime);
    cmd.arg("-c").arg(format!("import {}", dependency));
    exec::probe(&mut cmd, PROBE_TIMEOUT)
}

/// Resolve the commands to generate completions for: entry points the
/// manager already enumerated, else the environment's own executables,
/// else the package name itself.
fn find_package_commands(package: &InstalledPackage) -> Vec<String> {
    if let Some(commands) = &package.commands
        && !commands.is_empty()
    {
        return commands.clone();
    }

    let scanned = scan_bin_dir(&package.bin_dir());
    if scanned.is_empty() {
        vec![package.name.clone()]
    } else {
        scanned
    }
}

fn scan_bin_dir(bin_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(bin_dir) else {
        return Vec::new();
    };

    let mut commands: Vec<String> = entries
        .flatten()
        .filter(|entry| is_executable_file(&entry.path()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !is_runtime_tooling(name))
        .collect();

    commands.sort();
    commands
}

// The interpreter, installer, and build helpers live in every venv's bin
// directory but are never user-facing commands.
fn is_runtime_tooling(name: &str) -> bool {
    EXCLUDED_COMMAND_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
        || EXCLUDED_COMMANDS.contains(&name)
}

fn is_executable_file(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        path.is_file()
            && std::fs::metadata(path)
                .map(|meta| meta.permissions().mode() & 0o111 != 0)
                .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

#[cfg(test)]
mod tests;
