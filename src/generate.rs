//! Completion script generation.
//!
//! Turns classified packages into per-shell completion scripts by invoking
//! each tool's own generation mechanism. A final pass covers tools with a
//! fixed generation command that no package manager reports. Individual
//! invocation failures are collected, never fatal.

use crate::constants::{
    ARGCOMPLETE_HELPER, GENERATE_TIMEOUT, HARDCODED_COMPLETION_COMMANDS, HARDCODED_TIMEOUT,
};
use crate::core::types::{
    CompletionPackage, CompletionType, GeneratedCompletion, GenerationFailure, Shell,
};
use crate::exec::{self, CaptureOutcome};
use crate::ui;
use crate::utils::paths;
use rayon::prelude::*;
use std::process::Command;

/// Everything one generation stage produced: scripts ready for the cache
/// plus the invocations that failed along the way.
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    pub completions: Vec<GeneratedCompletion>,
    pub failures: Vec<GenerationFailure>,
}

impl GenerationOutcome {
    fn merge(mut self, other: GenerationOutcome) -> Self {
        self.completions.extend(other.completions);
        self.failures.extend(other.failures);
        self
    }
}

/// Generate completion scripts for every classified package and every
/// supported shell, then append the fixed-registry tools. Packages are
/// independent, so generation fans out on the rayon pool; completion
/// order follows package order either way.
pub fn generate_completions(packages: &[CompletionPackage]) -> GenerationOutcome {
    let generated = if packages.len() <= 1 {
        packages
            .iter()
            .map(generate_package_completions)
            .fold(GenerationOutcome::default(), GenerationOutcome::merge)
    } else {
        packages
            .par_iter()
            .map(generate_package_completions)
            .reduce(GenerationOutcome::default, GenerationOutcome::merge)
    };

    generated.merge(generate_hardcoded_completions())
}

fn generate_package_completions(package: &CompletionPackage) -> GenerationOutcome {
    match package.completion_type {
        CompletionType::Click => generate_click_completions(package),
        CompletionType::Argcomplete => generate_argcomplete_completions(package),
        // the classifier never assigns this to a discovered package; those
        // scripts come from the fixed registry pass below
        CompletionType::Hardcoded => GenerationOutcome::default(),
    }
}

/// Click tools emit their own script when invoked with a magic variable in
/// the environment, one invocation per command per shell.
fn generate_click_completions(package: &CompletionPackage) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();

    for shell in Shell::ALL {
        let mut parts = Vec::new();

        for command in &package.commands {
            let variable = click_trigger_variable(command);
            let value = format!("{shell}_source");
            ui::debug(&format!("generating: {variable}={value} {command}"));

            let mut cmd = Command::new(command);
            cmd.env(&variable, &value);

            match exec::run_captured(&mut cmd, GENERATE_TIMEOUT) {
                CaptureOutcome::Output(script) => parts.push(labeled_script(command, &script)),
                CaptureOutcome::Empty => {}
                CaptureOutcome::Failed(reason) => outcome.failures.push(GenerationFailure {
                    command: command.clone(),
                    reason,
                }),
            }
        }

        if !parts.is_empty() {
            outcome.completions.push(GeneratedCompletion {
                package_name: package.package.name.clone(),
                completion_type: CompletionType::Click,
                content: parts.join("\n"),
                commands: package.commands.clone(),
                shell,
            });
        }
    }

    outcome
}

/// Argcomplete output is shell-agnostic, so the registration helper runs
/// once per command and the combined script is emitted for every shell.
fn generate_argcomplete_completions(package: &CompletionPackage) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();
    let helper = package.package.bin_dir().join(ARGCOMPLETE_HELPER);

    let mut parts = Vec::new();
    for command in &package.commands {
        let mut cmd = Command::new(&helper);
        cmd.arg(command);

        match exec::run_captured(&mut cmd, GENERATE_TIMEOUT) {
            CaptureOutcome::Output(script) => parts.push(labeled_script(command, &script)),
            CaptureOutcome::Empty => {}
            CaptureOutcome::Failed(reason) => outcome.failures.push(GenerationFailure {
                command: format!("{} {}", helper.display(), command),
                reason,
            }),
        }
    }

    if parts.is_empty() {
        return outcome;
    }

    let content = parts.join("\n");
    for shell in Shell::ALL {
        outcome.completions.push(GeneratedCompletion {
            package_name: package.package.name.clone(),
            completion_type: CompletionType::Argcomplete,
            content: content.clone(),
            commands: package.commands.clone(),
            shell,
        });
    }

    outcome
}

/// Tools from the fixed registry, included only when the binary on PATH
/// lives under the user's home. System-wide installs ship completions
/// through system packages already.
fn generate_hardcoded_completions() -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();

    for (name, argv) in HARDCODED_COMPLETION_COMMANDS {
        if !tool_is_user_installed(name) {
            continue;
        }

        for shell in Shell::ALL {
            let mut cmd = Command::new(argv[0]);
            cmd.args(&argv[1..]).arg(shell.as_str());

            match exec::run_captured(&mut cmd, HARDCODED_TIMEOUT) {
                CaptureOutcome::Output(content) => outcome.completions.push(GeneratedCompletion {
                    package_name: (*name).to_string(),
                    completion_type: CompletionType::Hardcoded,
                    content,
                    commands: vec![(*name).to_string()],
                    shell,
                }),
                CaptureOutcome::Empty => {}
                CaptureOutcome::Failed(reason) => outcome.failures.push(GenerationFailure {
                    command: format!("{} {}", argv.join(" "), shell),
                    reason,
                }),
            }
        }
    }

    outcome
}

fn tool_is_user_installed(name: &str) -> bool {
    match which::which(name) {
        Ok(path) => paths::is_under_home(&path),
        Err(_) => false,
    }
}

/// Variable a click tool watches for: command name uppercased with every
/// non-alphanumeric character mapped to underscore.
fn click_trigger_variable(command: &str) -> String {
    let name: String = command
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("_{name}_COMPLETE")
}

fn labeled_script(command: &str, script: &str) -> String {
    format!("# Completion for {command}\n{script}")
}

#[cfg(test)]
mod tests;
