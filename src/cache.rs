//! Completion cache reconciliation.
//!
//! One file per (package, shell) pair plus a single aggregator script that
//! sources everything. Writes are idempotent: unchanged content leaves the
//! file untouched so shells can cheaply check freshness by mtime. All
//! writes go through a temp-file-then-rename to avoid torn files.

use crate::constants::{
    AGGREGATOR_FILE_NAME, CACHE_DIR_NAME, COMPLETION_EXTENSION, PROJECT_NAME, XDG_CACHE_ENV,
};
use crate::core::types::GeneratedCompletion;
use crate::error::{PycompgenError, Result};
use crate::ui;
use crate::utils::paths;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What a single save did to the cache file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Written,
    Unchanged,
}

/// Per-batch tally of cache writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SaveReport {
    pub written: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Cache directory honoring `$XDG_CACHE_HOME`, falling back to
/// `~/.cache`. An unset or empty variable means unset.
pub fn default_cache_dir() -> Result<PathBuf> {
    if let Ok(cache_home) = std::env::var(XDG_CACHE_ENV)
        && !cache_home.is_empty()
    {
        return Ok(PathBuf::from(cache_home).join(CACHE_DIR_NAME));
    }

    let home = paths::home_dir().ok_or(PycompgenError::DirectoryUnavailable("home"))?;
    Ok(home.join(".cache").join(CACHE_DIR_NAME))
}

/// Where the aggregator script lives inside `cache_dir`.
pub fn source_script_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(AGGREGATOR_FILE_NAME)
}

/// Save every completion, skipping files whose content is already current.
/// Per-file failures are logged and counted, never abort the batch.
pub fn save_completions(
    completions: &[GeneratedCompletion],
    cache_dir: &Path,
    force: bool,
) -> Result<SaveReport> {
    fs::create_dir_all(cache_dir).map_err(|e| PycompgenError::IoError {
        path: cache_dir.to_path_buf(),
        source: e,
    })?;

    let mut report = SaveReport::default();
    for completion in completions {
        match save_completion(completion, cache_dir, force) {
            Ok(SaveStatus::Written) => {
                report.written += 1;
                ui::debug(&format!("wrote {}", completion.file_name()));
            }
            Ok(SaveStatus::Unchanged) => report.unchanged += 1,
            Err(e) => {
                report.failed += 1;
                ui::warning(&e.to_string());
            }
        }
    }

    Ok(report)
}

/// Save one completion. Without `force`, byte-identical content is left
/// alone; an unreadable existing file is simply overwritten.
pub fn save_completion(
    completion: &GeneratedCompletion,
    cache_dir: &Path,
    force: bool,
) -> Result<SaveStatus> {
    let path = cache_dir.join(completion.file_name());

    if !force
        && let Ok(existing) = fs::read_to_string(&path)
        && existing == completion.content
    {
        return Ok(SaveStatus::Unchanged);
    }

    write_atomically(&path, &completion.content)?;
    Ok(SaveStatus::Written)
}

/// Regenerate the aggregator from whatever completion files are on disk,
/// previous runs' included. Always rewritten, never conditional: the
/// directory contents are the source of truth.
pub fn save_source_script(cache_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(cache_dir).map_err(|e| PycompgenError::IoError {
        path: cache_dir.to_path_buf(),
        source: e,
    })?;

    let script = render_source_script(cache_dir);
    let path = source_script_path(cache_dir);
    write_atomically(&path, &script)?;
    Ok(path)
}

/// Remove completion files whose stem is not in `keep_stems`. The
/// aggregator itself is never removed; per-file removal errors are
/// ignored. Returns how many files went away.
pub fn clean_stale(cache_dir: &Path, keep_stems: &HashSet<String>) -> usize {
    let mut removed = 0;

    for file in completion_files(cache_dir) {
        let keep = file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| keep_stems.contains(stem));
        if keep {
            continue;
        }

        match fs::remove_file(&file) {
            Ok(()) => {
                removed += 1;
                ui::debug(&format!("removed stale {}", file.display()));
            }
            Err(e) => ui::debug(&format!("could not remove {}: {}", file.display(), e)),
        }
    }

    removed
}

/// Completion files in the cache, sorted by name. The aggregator would
/// otherwise source itself, so it is excluded here.
fn completion_files(cache_dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(cache_dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext == COMPLETION_EXTENSION)
        })
        .filter(|path| path.file_name() != Some(OsStr::new(AGGREGATOR_FILE_NAME)))
        .collect();

    files.sort();
    files
}

fn render_source_script(cache_dir: &Path) -> String {
    let files = completion_files(cache_dir);
    let aggregator = source_script_path(cache_dir);

    let mut lines = vec![
        format!("# Generated by {PROJECT_NAME}"),
        "# This file sources all completion scripts".to_string(),
        String::new(),
    ];

    for file in &files {
        if let Some(stem) = file.file_stem().and_then(|stem| stem.to_str()) {
            lines.push(format!("# Completions from {stem}"));
        }
        lines.push(format!("source {}", file.display()));
        lines.push(String::new());
    }

    lines.push(format!(
        "# Add this to your shell config: source {}",
        aggregator.display()
    ));
    lines.push(String::new());

    lines.join("\n")
}

fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let mut tmp_file =
        fs::File::create(&tmp_path).map_err(|e| PycompgenError::CacheWriteError {
            path: tmp_path.clone(),
            source: e,
        })?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| PycompgenError::CacheWriteError {
            path: tmp_path.clone(),
            source: e,
        })?;
    tmp_file
        .sync_all()
        .map_err(|e| PycompgenError::CacheWriteError {
            path: tmp_path.clone(),
            source: e,
        })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| PycompgenError::CacheWriteError {
        path: path.to_path_buf(),
        source: e,
    })
}
