mod args;
mod commands;
mod output;

use clap::Parser;

use crate::commands::Commands;

#[derive(Parser)]
#[clap(name = "mallard")]
#[clap(about = "Orchestration CLI for an embedded analytical database")]
#[clap(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    logutil::configure_global_logger(level, logutil::LogFormat::HumanReadable);

    if let Err(err) = cli.command.run() {
        println!("ERROR: {err}");
        std::process::exit(1);
    }
}
