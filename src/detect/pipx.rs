//! `pipx list --json` output parsing.

use crate::constants::PIPX_VENVS_DIR;
use crate::core::types::{InstalledPackage, Manager};
use crate::ui;
use crate::utils::paths;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// pipx emits venvs keyed by package name, already sorted; a sorted map
// preserves that order deterministically.
#[derive(Debug, Deserialize)]
struct PipxListing {
    #[serde(default)]
    venvs: BTreeMap<String, PipxVenv>,
}

#[derive(Debug, Deserialize)]
struct PipxVenv {
    #[serde(default)]
    pyvenv_cfg: Option<PyvenvCfg>,
    #[serde(default)]
    metadata: Option<PipxMetadata>,
}

#[derive(Debug, Deserialize)]
struct PyvenvCfg {
    home: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PipxMetadata {
    main_package: Option<MainPackage>,
}

#[derive(Debug, Deserialize)]
struct MainPackage {
    package_version: Option<String>,
    #[serde(default)]
    apps: Vec<String>,
}

/// Parse the JSON listing. An undeserializable document yields zero
/// packages; a single malformed venv entry is skipped on its own.
pub fn parse_listing(output: &str) -> Vec<InstalledPackage> {
    let listing: PipxListing = match serde_json::from_str(output) {
        Ok(listing) => listing,
        Err(e) => {
            ui::debug(&format!("pipx listing is not valid JSON: {}", e));
            return Vec::new();
        }
    };

    listing
        .venvs
        .into_iter()
        .filter_map(|(name, venv)| installed_package(name, venv))
        .collect()
}

fn installed_package(name: String, venv: PipxVenv) -> Option<InstalledPackage> {
    let path = venv_path(&name, &venv)?;

    let main_package = venv.metadata.and_then(|m| m.main_package);
    let version = main_package
        .as_ref()
        .and_then(|m| m.package_version.clone());
    let commands = main_package
        .map(|m| m.apps)
        .filter(|apps| !apps.is_empty());

    Some(InstalledPackage {
        name,
        path,
        manager: Manager::Pipx,
        version,
        commands,
    })
}

// `pyvenv_cfg.home` points at the venv's bin directory; its parent is the
// environment root. Without it, fall back to the standard pipx location.
fn venv_path(name: &str, venv: &PipxVenv) -> Option<PathBuf> {
    if let Some(home) = venv.pyvenv_cfg.as_ref().and_then(|cfg| cfg.home.as_deref())
        && let Some(parent) = Path::new(home).parent()
    {
        return Some(parent.to_path_buf());
    }
    paths::home_dir().map(|home| home.join(PIPX_VENVS_DIR).join(name))
}
