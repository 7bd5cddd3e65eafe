pub mod analyze;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod core;
pub mod detect;
pub mod error;
pub mod exec;
pub mod generate;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run pycompgen CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Parse & Run
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.quiet);
    ui::set_verbose(args.verbose);

    let result = match args.completions {
        Some(shell) => commands::completions::run(shell),
        None => commands::run::run(&commands::run::RunOptions {
            cache_dir: args.cache_dir,
            force: args.force,
            clean: args.clean,
            source: args.source,
        }),
    };

    if let Err(e) = result {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
