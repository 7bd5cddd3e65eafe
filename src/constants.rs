// Common constants used throughout the codebase

use std::time::Duration;

/// Project name
pub const PROJECT_NAME: &str = "pycompgen";

/// Cache directory name under the user cache root
pub const CACHE_DIR_NAME: &str = "pycompgen";

/// Environment variable overriding the user cache root
pub const XDG_CACHE_ENV: &str = "XDG_CACHE_HOME";

/// Aggregator script file name
pub const AGGREGATOR_FILE_NAME: &str = "completions.sh";

/// Extension of cached completion files
pub const COMPLETION_EXTENSION: &str = "sh";

/// Interpreter binary name inside an environment's bin directory
pub const RUNTIME_BIN: &str = "python";

/// Registration helper shipped by argcomplete inside each environment
pub const ARGCOMPLETE_HELPER: &str = "register-python-argcomplete";

/// Fallback pipx venv location relative to the home directory
pub const PIPX_VENVS_DIR: &str = ".local/share/pipx/venvs";

/// Entry points excluded from command resolution by prefix (interpreter, installer)
pub const EXCLUDED_COMMAND_PREFIXES: &[&str] = &["python", "pip"];

/// Entry points excluded from command resolution by exact name (build helpers)
pub const EXCLUDED_COMMANDS: &[&str] = &["wheel"];

/// Timeout for dependency import probes
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for package manager listing commands
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for completion generation invocations
pub const GENERATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for hardcoded tool completion queries
pub const HARDCODED_TIMEOUT: Duration = Duration::from_secs(5);

/// Well-known tools whose completion command is fixed rather than discovered.
/// The target shell name is appended as the final argument.
pub const HARDCODED_COMPLETION_COMMANDS: &[(&str, &[&str])] = &[
    ("uv", &["uv", "generate-shell-completion"]),
    ("uvx", &["uvx", "--generate-shell-completion"]),
];
