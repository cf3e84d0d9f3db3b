use std::{fs, process::ExitCode};

use clap::Parser;
use entity::get_result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// entity runs programs written in a small typed language with C-like syntax
/// and runtime-extensible objects.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells entity to read the program from the file named by `contents`.
    #[arg(short, long)]
    file: bool,

    /// Quiet mode does not print the value returned by `main`.
    #[arg(short, long)]
    quiet: bool,

    contents: String,
}

/// Installs the diagnostic subscriber, filtered by `RUST_LOG`.
///
/// Diagnostics go to stderr; stdout carries only program output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry().with(filter)
                                  .with(fmt::layer().with_writer(std::io::stderr)
                                                    .with_target(false))
                                  .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let script = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(script) => script,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents
    };

    match get_result(&script, !args.quiet) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
