use clap::Parser;
use confdata::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
