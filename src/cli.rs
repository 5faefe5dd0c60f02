use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Exit codes mirror the decided build status: 0 success, 1 unstable,
/// 2 failure, 3 not-built; 4 on operational errors.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory file sets are resolved against.
    #[clap(default_value = ".")]
    pub path: PathBuf,

    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single finder described on the command line.
    Scan {
        /// Primary pattern; a line matching it marks the build.
        regexp: String,

        /// Pattern whose first hit yields the future build identifier.
        #[clap(long, value_parser)]
        build_id: Option<String>,

        /// Comma-separated include glob(s), e.g. "target/*.log,**/*.out".
        #[clap(long, value_parser)]
        file_set: Option<String>,

        /// Also scan the console log given via --console.
        #[clap(long, value_parser, default_value_t = false)]
        also_check_console: bool,

        /// Console log to scan; "-" reads standard input.
        #[clap(long, value_parser)]
        console: Option<PathBuf>,

        #[clap(long, value_parser, default_value_t = false)]
        not_built_if_found: bool,

        #[clap(long, value_parser, default_value_t = false)]
        unstable_if_found: bool,

        #[clap(long, value_parser, default_value_t = false)]
        succeed_if_found: bool,

        /// Print the final verdict as JSON instead of the colored summary.
        #[clap(long, value_parser, default_value_t = false)]
        json: bool,
    },
    /// Run every finder listed in a TOML job file, in order.
    Run {
        #[clap(long, value_parser)]
        config: PathBuf,

        /// Console log to scan; "-" reads standard input.
        #[clap(long, value_parser)]
        console: Option<PathBuf>,

        #[clap(long, value_parser, default_value_t = false)]
        json: bool,
    },
    /// Generate shell completions.
    Completions {
        #[clap(value_parser)]
        shell: clap_complete::Shell,
    },
}
