//! Package detection across isolated-environment managers.
//!
//! Each supported manager is queried independently through the bounded
//! capture primitive. An absent manager, a failing listing command, or
//! unparsable output contributes zero packages and never suppresses the
//! other manager's results.

pub mod pipx;
pub mod uv;

use crate::constants::LIST_TIMEOUT;
use crate::core::types::InstalledPackage;
use crate::exec::{self, CaptureOutcome};
use crate::ui;
use std::process::Command;

/// Detect all installed packages: uv first, then pipx, each preserving the
/// manager's own listing order.
pub fn detect_packages() -> Vec<InstalledPackage> {
    let mut packages = Vec::new();
    packages.extend(detect_uv_packages());
    packages.extend(detect_pipx_packages());
    packages
}

fn detect_uv_packages() -> Vec<InstalledPackage> {
    let mut cmd = Command::new("uv");
    cmd.args(["tool", "list", "--show-paths"]);

    match exec::run_captured(&mut cmd, LIST_TIMEOUT) {
        CaptureOutcome::Output(stdout) => uv::parse_listing(&stdout),
        CaptureOutcome::Empty => Vec::new(),
        CaptureOutcome::Failed(reason) => {
            ui::debug(&format!("uv tool list unavailable: {}", reason));
            Vec::new()
        }
    }
}

fn detect_pipx_packages() -> Vec<InstalledPackage> {
    let mut cmd = Command::new("pipx");
    cmd.args(["list", "--json"]);

    match exec::run_captured(&mut cmd, LIST_TIMEOUT) {
        CaptureOutcome::Output(stdout) => pipx::parse_listing(&stdout),
        CaptureOutcome::Empty => Vec::new(),
        CaptureOutcome::Failed(reason) => {
            ui::debug(&format!("pipx list unavailable: {}", reason));
            Vec::new()
        }
    }
}
