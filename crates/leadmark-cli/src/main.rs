//! Leadmark CLI - reflow page text with emphasized leading letters

use clap::Parser;
use leadmark_cli::{cli::Args, run};

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    match run::run(&args) {
        Ok(summary) => {
            if !args.quiet {
                println!(
                    "Wrote {} pages ({} source pages) to {} as {}",
                    summary.output_pages,
                    summary.source_pages,
                    args.output.display(),
                    summary.format
                );
            }
        },
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        },
    }
}
