use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Home directory of the invoking user, if resolvable.
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Whether `path` lives anywhere under the user's home directory tree.
pub fn is_under_home(path: &Path) -> bool {
    match home_dir() {
        Some(home) => path.starts_with(home),
        None => false,
    }
}

#[cfg(test)]
mod tests;
