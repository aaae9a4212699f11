use clap::{Parser, Subcommand};

mod config;
mod dispatch;
mod render;

use dispatch::run_cli;
use render::format_error_lines;

#[derive(Parser, Debug)]
#[command(name = "zig-toolchain")]
#[command(about = "Download and switch between Zig toolchain releases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List releases published in the remote index.
    List,
    /// List releases cached on this machine.
    Show,
    /// Download a release archive without activating it.
    Download {
        /// A release version such as 0.11.0, or `master`.
        version: String,
    },
    /// Make a release the active `zig`.
    Activate {
        /// A release version such as 0.11.0, or `master`.
        version: String,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run_cli(cli) {
        for line in format_error_lines(&err) {
            eprintln!("{line}");
        }
        std::process::exit(err.class().exit_code());
    }
}
