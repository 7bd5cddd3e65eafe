use super::*;
use crate::core::types::Manager;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

const IMPORTS_EVERYTHING: &str = "#!/bin/sh\nexit 0\n";
const IMPORTS_NOTHING: &str = "#!/bin/sh\nexit 1\n";
const IMPORTS_ARGCOMPLETE_ONLY: &str =
    "#!/bin/sh\ncase \"$2\" in\n  \"import click\") exit 1 ;;\n  *) exit 0 ;;\nesac\n";

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Fake environment root with a `bin/python` behaving per `runtime`.
fn env_with_runtime(runtime: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("bin")).unwrap();
    write_script(&dir.path().join("bin").join("python"), runtime);
    dir
}

fn package_at(root: &Path, name: &str, commands: Option<Vec<String>>) -> InstalledPackage {
    InstalledPackage {
        name: name.to_string(),
        path: root.to_path_buf(),
        manager: Manager::Uv,
        version: Some("1.0.0".to_string()),
        commands,
    }
}

#[test]
fn missing_runtime_drops_package() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("bin")).unwrap();

    let package = package_at(dir.path(), "tool", None);
    assert!(analyze_package(package).is_none());
}

#[test]
fn click_outranks_argcomplete() {
    let dir = env_with_runtime(IMPORTS_EVERYTHING);

    let package = package_at(dir.path(), "tool", Some(vec!["tool".to_string()]));
    let analyzed = analyze_package(package).unwrap();
    assert_eq!(analyzed.completion_type, CompletionType::Click);
}

#[test]
fn argcomplete_detected_when_click_is_absent() {
    let dir = env_with_runtime(IMPORTS_ARGCOMPLETE_ONLY);

    let package = package_at(dir.path(), "tool", Some(vec!["tool".to_string()]));
    let analyzed = analyze_package(package).unwrap();
    assert_eq!(analyzed.completion_type, CompletionType::Argcomplete);
}

#[test]
fn no_importable_mechanism_drops_package() {
    let dir = env_with_runtime(IMPORTS_NOTHING);

    let package = package_at(dir.path(), "tool", None);
    assert!(analyze_package(package).is_none());
}

#[test]
fn attached_commands_take_precedence_over_bin_scan() {
    let dir = env_with_runtime(IMPORTS_EVERYTHING);
    write_script(&dir.path().join("bin").join("other"), "#!/bin/sh\n");

    let package = package_at(
        dir.path(),
        "tool",
        Some(vec!["alpha".to_string(), "beta".to_string()]),
    );
    let analyzed = analyze_package(package).unwrap();
    assert_eq!(analyzed.commands, vec!["alpha", "beta"]);
}

#[test]
fn bin_scan_excludes_runtime_tooling_and_sorts() {
    let dir = env_with_runtime(IMPORTS_EVERYTHING);
    let bin = dir.path().join("bin");
    write_script(&bin.join("zeta"), "#!/bin/sh\n");
    write_script(&bin.join("alpha"), "#!/bin/sh\n");
    write_script(&bin.join("python3.12"), "#!/bin/sh\n");
    write_script(&bin.join("pip3"), "#!/bin/sh\n");
    write_script(&bin.join("wheel"), "#!/bin/sh\n");
    // present but not executable, so never a command
    fs::write(bin.join("README.txt"), "docs").unwrap();

    let package = package_at(dir.path(), "tool", None);
    let analyzed = analyze_package(package).unwrap();
    assert_eq!(analyzed.commands, vec!["alpha", "zeta"]);
}

#[test]
fn empty_bin_falls_back_to_package_name() {
    let dir = env_with_runtime(IMPORTS_EVERYTHING);

    let package = package_at(dir.path(), "standalone", None);
    let analyzed = analyze_package(package).unwrap();
    assert_eq!(analyzed.commands, vec!["standalone"]);
}

#[test]
fn empty_attached_commands_fall_through_to_scan() {
    let dir = env_with_runtime(IMPORTS_EVERYTHING);
    write_script(&dir.path().join("bin").join("mycmd"), "#!/bin/sh\n");

    let package = package_at(dir.path(), "tool", Some(Vec::new()));
    let analyzed = analyze_package(package).unwrap();
    assert_eq!(analyzed.commands, vec!["mycmd"]);
}

#[test]
fn batch_classification_preserves_input_order() {
    let first = env_with_runtime(IMPORTS_EVERYTHING);
    let second = env_with_runtime(IMPORTS_EVERYTHING);
    let third = env_with_runtime(IMPORTS_NOTHING);

    let packages = vec![
        package_at(first.path(), "one", Some(vec!["one".to_string()])),
        package_at(third.path(), "dropped", None),
        package_at(second.path(), "two", Some(vec!["two".to_string()])),
    ];

    let analyzed = analyze_packages(packages);
    let names: Vec<&str> = analyzed.iter().map(|c| c.package.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);
}
