//! `set` subcommand: apply one light state to the device.

use std::path::Path;

use super::{
    HwLightError, LightRole, LightState, Lights, ProgramJson, Result, SetOutput, brightness, kv,
    kv_width, led, load_config, print_json,
};
use hwlight_lib::FlashMode;

/// Build the requested state. Flashing is timed only when both durations are set.
fn build_state(color: u32, flash_on: u32, flash_off: u32) -> LightState {
    if flash_on > 0 || flash_off > 0 {
        LightState::timed(color, flash_on, flash_off)
    } else {
        LightState::solid(color)
    }
}

pub(super) fn cmd_set(
    role: &str,
    color: &str,
    flash_on: u32,
    flash_off: u32,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let role = LightRole::parse(role).ok_or_else(|| match role.trim().parse::<i32>() {
        Ok(id) => HwLightError::UnsupportedOperation(id),
        Err(_) => HwLightError::Request(format!("Unknown light: {role}")),
    })?;
    let state = build_state(led::parse_color(color)?, flash_on, flash_off);

    let config = load_config(config_path);
    let lights = Lights::open(&config)?;
    lights.set_light(role, state)?;

    let (led_program, backlight_level) = match role {
        LightRole::Backlight => (
            None,
            Some(brightness::backlight_level(
                state.color,
                lights.max_brightness(),
            )),
        ),
        LightRole::Buttons => (None, None),
        _ => (Some(lights.shared_states().program()), None),
    };

    if json {
        return print_json(&SetOutput {
            role,
            id: role.id(),
            state,
            led: led_program.map(ProgramJson::from),
            backlight_level,
        });
    }

    let w = kv_width(&["Light:", "State:", "LED:", "Backlight:"], &[]);
    kv("Light:", format_args!("{role} (id {})", role.id()), w);
    let flash = match state.flash_mode {
        FlashMode::Timed => format!(" flash {}/{} ms", state.flash_on_ms, state.flash_off_ms),
        _ => String::new(),
    };
    kv(
        "State:",
        format_args!("{}{flash}", led::format_color(state.color)),
        w,
    );
    if let Some(p) = led_program {
        kv(
            "LED:",
            format_args!(
                "red={} green={} breath={}",
                p.red,
                p.green,
                if p.breath { "on" } else { "off" }
            ),
            w,
        );
    }
    if let Some(level) = backlight_level {
        kv("Backlight:", format_args!("{level} / {}", lights.max_brightness()), w);
    }
    if role == LightRole::Buttons {
        println!("(no buttons light on this device, nothing written)");
    }
    Ok(())
}
