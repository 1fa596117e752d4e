//! CLI subcommands: light listing, one-shot light control, config, brightness math.

mod config_cmd;
mod lights;
mod scale;
mod set;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use hwlight_lib::config::Config;
pub(super) use hwlight_lib::error::Result;
pub(super) use hwlight_lib::led::LedProgram;
pub(super) use hwlight_lib::{HwLight, HwLightError, LightRole, LightState, Lights, brightness, led};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load config from `--config` if given, else from the default location.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    Config::load_or_default(custom_path)
}

/// Print a value as pretty JSON.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| HwLightError::Config(format!("JSON serialization failed: {e}")))?;
    println!("{json}");
    Ok(())
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct LightsOutput {
    pub count: usize,
    pub lights: Vec<HwLight>,
}

#[derive(Serialize)]
pub(super) struct ProgramJson {
    pub red: u32,
    pub green: u32,
    pub breath: bool,
}

impl From<LedProgram> for ProgramJson {
    fn from(p: LedProgram) -> Self {
        ProgramJson {
            red: p.red,
            green: p.green,
            breath: p.breath,
        }
    }
}

#[derive(Serialize)]
pub(super) struct SetOutput {
    pub role: LightRole,
    pub id: i32,
    pub state: LightState,
    /// Shared LED program after the update (battery, notification, attention).
    pub led: Option<ProgramJson>,
    /// Backlight level written (backlight only).
    pub backlight_level: Option<u32>,
}

#[derive(Serialize)]
pub(super) struct ScaleOutput {
    pub color: String,
    pub luminance: u32,
    pub max_brightness: u32,
    pub level: u32,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the lights this device controls
    Lights,

    /// Apply one light state to the device (other shared lights start off)
    Set {
        /// Light role name (battery, notification, attention, backlight, buttons) or id
        role: String,
        /// Color: #RRGGBB, #AARRGGBB, 0xAARRGGBB, or a name (red, green, amber, white, off)
        #[arg(long, default_value = "off")]
        color: String,
        /// Flash on duration in milliseconds (timed flashing when both are > 0)
        #[arg(long, default_value_t = 0)]
        flash_on: u32,
        /// Flash off duration in milliseconds
        #[arg(long, default_value_t = 0)]
        flash_off: u32,
    },

    /// Show current configuration and file paths
    Config,

    /// Compute the backlight level for a color (no hardware writes)
    Scale {
        /// Color to convert
        color: String,
        /// Device maximum brightness (default: read from the configured max_brightness file)
        #[arg(long)]
        max: Option<u32>,
    },
}

pub fn run(cmd: Command, json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config_path.as_deref();
    match cmd {
        Command::Lights => lights::cmd_lights(json),
        Command::Set {
            role,
            color,
            flash_on,
            flash_off,
        } => set::cmd_set(&role, &color, flash_on, flash_off, json, config_path),
        Command::Config => config_cmd::cmd_config(json, config_path),
        Command::Scale { color, max } => scale::cmd_scale(&color, max, json, config_path),
    }
}
