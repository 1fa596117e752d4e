//! hwlightd: lights service daemon.
//!
//! Opens the LED control files, then answers newline-delimited JSON requests
//! on stdin with one JSON response per line on stdout until stdin closes.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use hwlight_lib::config::Config;
use hwlight_lib::{Lights, service};

#[derive(Parser)]
#[command(
    name = "hwlightd",
    version,
    about = "Lights service: serves set_light_state / get_lights requests on stdin"
)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Stderr)
        .init();

    let config = Config::load_or_default(args.config.as_deref());
    if let Err(errors) = config.validate() {
        for e in &errors {
            log::error!("invalid config: {e}");
        }
        std::process::exit(1);
    }

    let lights = match Lights::open(&config) {
        Ok(lights) => lights,
        Err(e) => {
            let code = e.raw_os_error().unwrap_or(1);
            log::error!("{e} (error={code})");
            std::process::exit(code);
        }
    };
    log::info!(
        "lights service ready, backlight max brightness {}",
        lights.max_brightness()
    );

    match service::serve(&lights, io::stdin().lock(), io::stdout().lock()) {
        Ok(handled) => log::info!("input closed after {handled} requests, exiting"),
        Err(e) => {
            log::error!("request stream failed: {e}");
            std::process::exit(1);
        }
    }
}
