//! LED output operations: write a program to the shared LED, set the backlight.

use crate::brightness;
use crate::device::{LedOutputs, Result, Sink};

use super::program::LedProgram;

/// Write a program to the two-color LED.
///
/// Both breath controls are cleared first so a previous blink never
/// overlaps the new one. A breathing program only arms the breath control
/// of the channels in use; a steady program writes both levels.
pub fn apply_program(outputs: &mut impl LedOutputs, program: &LedProgram) -> Result<()> {
    outputs.write(Sink::RedBreath, 0)?;
    outputs.write(Sink::GreenBreath, 0)?;

    if program.breath {
        if program.green != 0 {
            outputs.write(Sink::GreenBreath, 1)?;
        }
        if program.red != 0 {
            outputs.write(Sink::RedBreath, 1)?;
        }
    } else {
        outputs.write(Sink::RedLevel, program.red)?;
        outputs.write(Sink::GreenLevel, program.green)?;
    }
    Ok(())
}

/// Write the backlight level for `color`, scaled to `max_brightness`.
///
/// Returns the level written.
pub fn set_backlight(outputs: &mut impl LedOutputs, color: u32, max_brightness: u32) -> Result<u32> {
    let level = brightness::backlight_level(color, max_brightness);
    log::debug!("backlight color={color:#010x} max={max_brightness} level={level}");
    outputs.write(Sink::Backlight, level)?;
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::MockOutputs;

    // ── apply_program ──

    #[test]
    fn steady_program_writes_levels() {
        let mut out = MockOutputs::new();
        apply_program(
            &mut out,
            &LedProgram {
                red: 0xFF,
                green: 0,
                breath: false,
            },
        )
        .unwrap();
        assert_eq!(
            out.writes(),
            vec![
                (Sink::RedBreath, 0),
                (Sink::GreenBreath, 0),
                (Sink::RedLevel, 0xFF),
                (Sink::GreenLevel, 0),
            ]
        );
    }

    #[test]
    fn off_program_clears_everything() {
        let mut out = MockOutputs::new();
        apply_program(&mut out, &LedProgram::OFF).unwrap();
        assert_eq!(
            out.writes(),
            vec![
                (Sink::RedBreath, 0),
                (Sink::GreenBreath, 0),
                (Sink::RedLevel, 0),
                (Sink::GreenLevel, 0),
            ]
        );
    }

    #[test]
    fn breathing_green_arms_green_only() {
        let mut out = MockOutputs::new();
        apply_program(
            &mut out,
            &LedProgram {
                red: 0,
                green: 0xFF,
                breath: true,
            },
        )
        .unwrap();
        assert_eq!(
            out.writes(),
            vec![
                (Sink::RedBreath, 0),
                (Sink::GreenBreath, 0),
                (Sink::GreenBreath, 1),
            ]
        );
    }

    #[test]
    fn breathing_amber_arms_green_then_red() {
        let mut out = MockOutputs::new();
        apply_program(
            &mut out,
            &LedProgram {
                red: 0x08,
                green: 0xFF,
                breath: true,
            },
        )
        .unwrap();
        assert_eq!(
            out.writes()[2..],
            [(Sink::GreenBreath, 1), (Sink::RedBreath, 1)]
        );
    }

    #[test]
    fn breathing_dark_program_only_clears() {
        let mut out = MockOutputs::new();
        apply_program(
            &mut out,
            &LedProgram {
                red: 0,
                green: 0,
                breath: true,
            },
        )
        .unwrap();
        assert_eq!(out.writes().len(), 2);
    }

    #[test]
    fn apply_stops_at_first_failure() {
        let mut out = MockOutputs::new();
        out.fail_on(Some(Sink::GreenBreath));
        assert!(apply_program(&mut out, &LedProgram::OFF).is_err());
        assert_eq!(out.writes(), vec![(Sink::RedBreath, 0)]);
    }

    // ── set_backlight ──

    #[test]
    fn backlight_unscaled_on_reference_device() {
        let mut out = MockOutputs::new();
        let level = set_backlight(&mut out, 0xFFFF_FFFF, 255).unwrap();
        assert_eq!(level, 255);
        assert_eq!(out.writes(), vec![(Sink::Backlight, 255)]);
    }

    #[test]
    fn backlight_scaled_on_wide_device() {
        let mut out = MockOutputs::new();
        set_backlight(&mut out, 0xFF80_8080, 4095).unwrap();
        // luminance (77+150+29)*128 >> 8 = 128; 128 * 4095 / 255 = 2055.5
        assert_eq!(out.last(Sink::Backlight), Some(2055));
    }
}
