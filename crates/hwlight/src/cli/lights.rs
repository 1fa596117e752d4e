//! `lights` subcommand: list the lights this device controls.

use super::{LightsOutput, Result, kv, kv_width, print_json};
use hwlight_lib::arbiter::tracked_lights;

pub(super) fn cmd_lights(json: bool) -> Result<()> {
    let lights = tracked_lights();

    if json {
        return print_json(&LightsOutput {
            count: lights.len(),
            lights,
        });
    }

    println!(
        "{} light{}:",
        lights.len(),
        if lights.len() == 1 { "" } else { "s" }
    );
    println!();

    let names: Vec<String> = lights.iter().map(|l| format!("{}:", l.role)).collect();
    let keys: Vec<&str> = names.iter().map(String::as_str).collect();
    let w = kv_width(&keys, &[]);
    for (light, key) in lights.iter().zip(&keys) {
        kv(key, format_args!("id {} ordinal {}", light.id, light.ordinal), w);
    }
    Ok(())
}
