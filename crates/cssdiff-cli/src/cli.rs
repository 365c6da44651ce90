use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cssdiff")]
#[command(about = "Compare parsed CSS syntax trees, ignoring comments, quoting and hex color case")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two JSON syntax trees; exits 0 when equivalent and 1 when changed
    Compare {
        /// First (baseline) tree; `-` reads from stdin
        first: PathBuf,
        /// Second tree; `-` reads from stdin
        second: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Print nothing, only set the exit status
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}
