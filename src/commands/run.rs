//! The full detect, classify, generate, reconcile pipeline.

use crate::analyze;
use crate::cache;
use crate::detect;
use crate::error::Result;
use crate::generate;
use crate::ui;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for one reconciliation run, straight off the CLI.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub cache_dir: Option<PathBuf>,
    pub force: bool,
    pub clean: bool,
    pub source: bool,
}

pub fn run(options: &RunOptions) -> Result<()> {
    let cache_dir = match &options.cache_dir {
        Some(dir) => dir.clone(),
        None => cache::default_cache_dir()?,
    };

    if options.source && print_source_script(&cache_dir) {
        return Ok(());
    }

    // 1. Detect
    ui::info("Detecting installed packages...");
    let packages = detect::detect_packages();
    ui::info(&format!("Found {} packages", packages.len()));

    // 2. Classify
    ui::info("Analyzing packages for completion support...");
    let completion_packages = analyze::analyze_packages(packages);
    ui::info(&format!(
        "Found {} packages with completion support",
        completion_packages.len()
    ));

    // 3. Generate
    ui::info("Generating completions...");
    let outcome = generate::generate_completions(&completion_packages);
    ui::info(&format!(
        "Generated {} completions",
        outcome.completions.len()
    ));
    if !outcome.failures.is_empty() {
        ui::warning(&format!(
            "Completion generation failed for {} commands",
            outcome.failures.len()
        ));
        for failure in &outcome.failures {
            ui::debug(&format!("{}: {}", failure.command, failure.reason));
        }
    }

    // 4. Reconcile the cache
    let report = cache::save_completions(&outcome.completions, &cache_dir, options.force)?;
    ui::debug(&format!(
        "cache: {} written, {} unchanged, {} failed",
        report.written, report.unchanged, report.failed
    ));

    if options.clean {
        let keep: HashSet<String> = outcome
            .completions
            .iter()
            .map(|completion| completion.file_stem())
            .collect();
        let removed = cache::clean_stale(&cache_dir, &keep);
        if removed > 0 {
            ui::info(&format!("Removed {removed} stale completion files"));
        }
    }

    // The aggregator reflects the directory as a whole, so it is rebuilt
    // even when every completion file was up to date.
    let source_script = cache::save_source_script(&cache_dir)?;

    ui::success(&format!("Completions saved to {}", cache_dir.display()));
    ui::info(&format!("Source script: {}", source_script.display()));

    Ok(())
}

// An unreadable aggregator falls through to a full run; the first
// invocation from a fresh shell config has nothing to print yet.
fn print_source_script(cache_dir: &Path) -> bool {
    match fs::read_to_string(cache::source_script_path(cache_dir)) {
        Ok(content) => {
            println!("{content}");
            true
        }
        Err(_) => false,
    }
}
