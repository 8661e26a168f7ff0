//! CSV to GedcomX converter
//!
//! `convert <persons.csv> <families.csv> [--output <path>]`

mod args;
mod run;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays pure JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(args.verbose))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(json) = run::run(&args)? {
        println!("{json}");
    }

    Ok(())
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
