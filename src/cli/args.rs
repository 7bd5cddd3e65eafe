use crate::constants::PROJECT_NAME;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = PROJECT_NAME,
    about = "Generate shell completions for installed Python tools",
    long_about = "Detects CLI tools installed through uv tool and pipx, generates bash and \
zsh completion scripts for them, and keeps a sourceable cache up to date.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    /// Override default cache directory
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Force regeneration of all completions
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Remove cached completions for tools that are gone
    #[arg(long)]
    pub clean: bool,

    /// Only write the source file contents to stdout
    #[arg(long)]
    pub source: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Generate completions for pycompgen itself
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}
