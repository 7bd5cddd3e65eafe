use super::*;
use crate::core::types::{InstalledPackage, Manager};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn package(root: &Path, completion_type: CompletionType, commands: Vec<String>) -> CompletionPackage {
    CompletionPackage {
        package: InstalledPackage {
            name: "tool".to_string(),
            path: root.to_path_buf(),
            manager: Manager::Uv,
            version: None,
            commands: None,
        },
        completion_type,
        commands,
    }
}

#[test]
fn trigger_variable_uppercases_and_replaces_punctuation() {
    assert_eq!(click_trigger_variable("mytool"), "_MYTOOL_COMPLETE");
    assert_eq!(click_trigger_variable("my-tool"), "_MY_TOOL_COMPLETE");
    assert_eq!(click_trigger_variable("foo.bar2"), "_FOO_BAR2_COMPLETE");
}

#[test]
fn click_generates_one_script_per_shell() {
    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("fake-tool");
    write_script(&tool, "#!/bin/sh\necho \"completion body\"\n");

    let command = tool.to_str().unwrap().to_string();
    let pkg = package(dir.path(), CompletionType::Click, vec![command.clone()]);
    let outcome = generate_package_completions(&pkg);

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.completions.len(), 2);
    let shells: Vec<Shell> = outcome.completions.iter().map(|c| c.shell).collect();
    assert_eq!(shells, vec![Shell::Bash, Shell::Zsh]);
    for completion in &outcome.completions {
        assert_eq!(
            completion.content,
            format!("# Completion for {command}\ncompletion body")
        );
        assert_eq!(completion.completion_type, CompletionType::Click);
        assert_eq!(completion.package_name, "tool");
    }
}

#[test]
fn click_keeps_successful_commands_when_one_fails() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good");
    let bad = dir.path().join("bad");
    write_script(&good, "#!/bin/sh\necho \"good body\"\n");
    write_script(&bad, "#!/bin/sh\nexit 1\n");

    let good_cmd = good.to_str().unwrap().to_string();
    let bad_cmd = bad.to_str().unwrap().to_string();
    let pkg = package(
        dir.path(),
        CompletionType::Click,
        vec![good_cmd.clone(), bad_cmd.clone()],
    );
    let outcome = generate_package_completions(&pkg);

    // one failure record per shell attempt
    assert_eq!(outcome.failures.len(), 2);
    for failure in &outcome.failures {
        assert_eq!(failure.command, bad_cmd);
        assert!(failure.reason.contains("status 1"), "{}", failure.reason);
    }

    assert_eq!(outcome.completions.len(), 2);
    for completion in &outcome.completions {
        assert_eq!(
            completion.content,
            format!("# Completion for {good_cmd}\ngood body")
        );
    }
}

#[test]
fn click_partial_shell_success_keeps_the_good_shell() {
    let dir = TempDir::new().unwrap();
    let tool = dir.path().join("bashful");
    let command = tool.to_str().unwrap().to_string();
    let variable = click_trigger_variable(&command);
    write_script(
        &tool,
        &format!(
            "#!/bin/sh\ncase \"${{{variable}}}\" in\n  bash_source) echo \"bash body\" ;;\n  *) exit 1 ;;\nesac\n"
        ),
    );

    let pkg = package(dir.path(), CompletionType::Click, vec![command.clone()]);
    let outcome = generate_package_completions(&pkg);

    assert_eq!(outcome.completions.len(), 1);
    assert_eq!(outcome.completions[0].shell, Shell::Bash);
    assert_eq!(
        outcome.completions[0].content,
        format!("# Completion for {command}\nbash body")
    );

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].command, command);
}

#[test]
fn click_empty_output_is_skipped_without_failure() {
    let dir = TempDir::new().unwrap();
    let silent = dir.path().join("silent");
    write_script(&silent, "#!/bin/sh\nexit 0\n");

    let pkg = package(
        dir.path(),
        CompletionType::Click,
        vec![silent.to_str().unwrap().to_string()],
    );
    let outcome = generate_package_completions(&pkg);

    assert!(outcome.completions.is_empty());
    assert!(outcome.failures.is_empty());
}

#[test]
fn argcomplete_runs_helper_once_per_command_and_duplicates_per_shell() {
    let dir = TempDir::new().unwrap();
    let bin = dir.path().join("bin");
    fs::create_dir(&bin).unwrap();
    let helper = bin.join(ARGCOMPLETE_HELPER);
    write_script(
        &helper,
        "#!/bin/sh\necho x >> \"$0.calls\"\necho \"register $1\"\n",
    );

    let pkg = package(
        dir.path(),
        CompletionType::Argcomplete,
        vec!["alpha".to_string(), "beta".to_string()],
    );
    let outcome = generate_package_completions(&pkg);

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.completions.len(), 2);
    let shells: Vec<Shell> = outcome.completions.iter().map(|c| c.shell).collect();
    assert_eq!(shells, vec![Shell::Bash, Shell::Zsh]);

    let expected = "# Completion for alpha\nregister alpha\n# Completion for beta\nregister beta";
    for completion in &outcome.completions {
        assert_eq!(completion.content, expected);
        assert_eq!(completion.completion_type, CompletionType::Argcomplete);
    }

    // shell-agnostic output: two commands means exactly two helper runs
    let calls = fs::read_to_string(format!("{}.calls", helper.display())).unwrap();
    assert_eq!(calls.lines().count(), 2);
}

#[test]
fn argcomplete_missing_helper_records_failures() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("bin")).unwrap();

    let pkg = package(
        dir.path(),
        CompletionType::Argcomplete,
        vec!["one".to_string(), "two".to_string()],
    );
    let outcome = generate_package_completions(&pkg);

    assert!(outcome.completions.is_empty());
    assert_eq!(outcome.failures.len(), 2);
    for failure in &outcome.failures {
        assert!(failure.reason.contains("spawn"), "{}", failure.reason);
    }
}

#[test]
fn discovered_packages_never_use_the_fixed_registry_arm() {
    let dir = TempDir::new().unwrap();
    let pkg = package(
        dir.path(),
        CompletionType::Hardcoded,
        vec!["uv".to_string()],
    );
    let outcome = generate_package_completions(&pkg);

    assert!(outcome.completions.is_empty());
    assert!(outcome.failures.is_empty());
}
