//! hwlight CLI: inspect and drive the LED control files by hand.

use std::path::PathBuf;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "hwlight-cli",
    version,
    about = "Inspect and drive sysfs lights (backlight, battery, notification, attention)"
)]
struct Args {
    /// Output as JSON (for lights, set, config, scale)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = cli::run(args.command, args.json, args.config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
