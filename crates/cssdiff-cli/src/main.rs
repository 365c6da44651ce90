use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use cssdiff_core::{diff, load_stylesheet, read_stylesheet, Stylesheet};

mod cli;
mod logging;
mod report;

use cli::{Cli, Commands, Format};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli.command) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the stylesheets differ.
fn run(command: Commands) -> anyhow::Result<bool> {
    match command {
        Commands::Compare {
            first,
            second,
            format,
            quiet,
        } => {
            if is_stdin(&first) && is_stdin(&second) {
                bail!("only one of the two inputs can be read from stdin");
            }

            let first = load(&first).context("first stylesheet")?;
            let second = load(&second).context("second stylesheet")?;
            let result = diff(&first, &second);

            if !quiet {
                let rendered = match format {
                    Format::Text => report::render_text(&result),
                    Format::Json => report::render_json(&result)?,
                };
                print!("{}", rendered);
            }

            Ok(result.changed)
        }
    }
}

fn load(path: &Path) -> cssdiff_core::Result<Stylesheet> {
    if is_stdin(path) {
        read_stylesheet(io::stdin().lock(), "<stdin>")
    } else {
        load_stylesheet(path)
    }
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}
