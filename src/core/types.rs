use std::fmt;
use std::path::PathBuf;

use crate::constants::COMPLETION_EXTENSION;

// Supported package managers.
// To add a new manager (e.g. pip --user), add a variant here and update:
// - Manager's Display impl
// - detect::detect_packages() (fixed manager ordering)
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Manager {
    Uv,   // uv tool (isolated venvs under the uv tools dir)
    Pipx, // pipx (isolated venvs under the pipx home)
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uv => write!(f, "uv"),
            Self::Pipx => write!(f, "pipx"),
        }
    }
}

// Target shell dialects. Adding a shell is a compile-time checked
// extension: every dispatch site matches exhaustively.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
}

impl Shell {
    /// All supported shells, in fixed generation order.
    pub const ALL: [Shell; 2] = [Shell::Bash, Shell::Zsh];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// How a package emits completion script text.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CompletionType {
    /// Self-registering via `_<NAME>_COMPLETE=<shell>_source` (click convention)
    Click,
    /// External registration helper inside the environment (argcomplete convention)
    Argcomplete,
    /// Fixed per-tool completion subcommand, independent of discovery
    Hardcoded,
}

impl fmt::Display for CompletionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Click => write!(f, "click"),
            Self::Argcomplete => write!(f, "argcomplete"),
            Self::Hardcoded => write!(f, "hardcoded"),
        }
    }
}

/// A CLI tool discovered in an isolated environment. Created fresh on every
/// run and never persisted.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    pub name: String,
    /// Environment root (the venv directory)
    pub path: PathBuf,
    pub manager: Manager,
    pub version: Option<String>,
    /// Entry points already enumerated by the manager, if any
    pub commands: Option<Vec<String>>,
}

impl InstalledPackage {
    /// Executable entries directory of the environment.
    pub fn bin_dir(&self) -> PathBuf {
        self.path.join("bin")
    }
}

/// An installed package annotated with its resolved completion strategy.
/// Invariant: `commands` is never empty.
#[derive(Debug, Clone)]
pub struct CompletionPackage {
    pub package: InstalledPackage,
    pub completion_type: CompletionType,
    pub commands: Vec<String>,
}

/// One unit of completion script text for one (package, shell) pair.
#[derive(Debug, Clone)]
pub struct GeneratedCompletion {
    pub package_name: String,
    pub completion_type: CompletionType,
    pub content: String,
    pub commands: Vec<String>,
    pub shell: Shell,
}

impl GeneratedCompletion {
    /// Cache filename stem. One file per (package, shell) keeps click's
    /// shell-specific output from clobbering the other dialect.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.package_name, self.shell)
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem(), COMPLETION_EXTENSION)
    }
}

/// A completion invocation that produced no usable output.
#[derive(Debug, Clone)]
pub struct GenerationFailure {
    pub command: String,
    pub reason: String,
}
