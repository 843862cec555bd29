use clap::Parser;
use sortdir::cli::{Args, run_cli};
use sortdir::output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run_cli(&args.path) {
        OutputFormatter::error(&e.to_string());
        std::process::exit(1);
    }
}
