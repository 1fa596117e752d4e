//! `scale` subcommand: show the luminance and backlight level for a color.

use std::path::Path;

use super::{Result, ScaleOutput, brightness, kv, kv_width, led, load_config, print_json};
use hwlight_lib::device::read_max_brightness;

pub(super) fn cmd_scale(
    color: &str,
    max: Option<u32>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let color = led::parse_color(color)?;
    let max_brightness = match max {
        Some(m) if m > 0 => m,
        Some(_) => brightness::REFERENCE_MAX_BRIGHTNESS,
        None => {
            let config = load_config(config_path);
            read_max_brightness(Path::new(&config.backlight_max_path))
        }
    };
    let luminance = brightness::to_luminance(color);
    let level = brightness::scale_to_device_range(luminance, max_brightness);

    if json {
        return print_json(&ScaleOutput {
            color: led::format_color(color),
            luminance,
            max_brightness,
            level,
        });
    }

    let w = kv_width(&["Color:", "Luminance:", "Max brightness:", "Level:"], &[]);
    kv("Color:", led::format_color(color), w);
    kv("Luminance:", format_args!("{luminance} / 255"), w);
    kv("Max brightness:", max_brightness, w);
    kv("Level:", level, w);
    Ok(())
}
