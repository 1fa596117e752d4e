//! Color/blink program for the shared two-color LED.
//!
//! The LED only renders saturated red, saturated green, an amber
//! approximation, or off. Requested colors are quantized based on which
//! logical light the selected state belongs to, not on the raw RGB value.

use crate::types::LightState;

/// Amber approximation: a touch of red on full green.
const AMBER: (u32, u32) = (0x08, 0xFF);
/// Minimum red channel for a battery color to be treated as amber.
const AMBER_MIN_RED: u32 = 0x50;

/// Which stored logical state the selected state matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedSource {
    Battery,
    Notification,
    /// Attention, or the default off state.
    Other,
}

impl LedSource {
    /// Identify the source by value comparison against the stored states.
    ///
    /// Battery is checked first, so a selected state equal to both stored
    /// states counts as battery.
    pub fn identify(selected: &LightState, battery: &LightState, notification: &LightState) -> Self {
        if selected == battery {
            LedSource::Battery
        } else if selected == notification {
            LedSource::Notification
        } else {
            LedSource::Other
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LedSource::Battery => "battery",
            LedSource::Notification => "notification",
            LedSource::Other => "other",
        }
    }
}

/// Resolved output values for one apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedProgram {
    pub red: u32,
    pub green: u32,
    pub breath: bool,
}

impl LedProgram {
    /// The all-off program.
    pub const OFF: LedProgram = LedProgram {
        red: 0,
        green: 0,
        breath: false,
    };

    /// Compute the program for `state` coming from `source`.
    pub fn compute(state: &LightState, source: LedSource) -> Self {
        let (on_ms, off_ms) = state.effective_flash();
        let breath = on_ms > 0 && off_ms > 0;
        let red = (state.color >> 16) & 0xFF;
        let green = (state.color >> 8) & 0xFF;

        let (red, green) = if state.color > 0x00FF_FFFF {
            match source {
                LedSource::Battery => battery_color(red, green, breath),
                LedSource::Notification => (0, 0xFF),
                LedSource::Other => (0, 0),
            }
        } else {
            (0, 0)
        };

        LedProgram { red, green, breath }
    }
}

fn battery_color(red: u32, green: u32, breath: bool) -> (u32, u32) {
    if red >= green {
        (0xFF, 0)
    } else if !breath && red >= AMBER_MIN_RED && green > red {
        AMBER
    } else {
        (0, 0xFF)
    }
}
