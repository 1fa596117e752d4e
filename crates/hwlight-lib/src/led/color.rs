//! Color parsing and formatting for light requests.
//!
//! Colors use the platform format `0xAARRGGBB`. A color without an alpha
//! byte is treated as fully opaque, since the LED ignores colors whose top
//! byte is zero.

/// Parse a color string into `0xAARRGGBB`.
///
/// Accepts:
/// - Hex: `"#FF0000"` (alpha forced to `FF`), `"#80FF0000"`, `"0xFFFF0000"`
/// - Named: `"red"`, `"green"`, `"amber"`, `"blue"`, `"white"`, `"off"`
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(0xFFFF_0000),
        "green" => return Ok(0xFF00_FF00),
        "amber" => return Ok(0xFFFF_BF00),
        "blue" => return Ok(0xFF00_00FF),
        "white" => return Ok(0xFFFF_FFFF),
        "off" | "black" => return Ok(0x0000_0000),
        _ => {}
    }

    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let invalid = || {
        crate::HwLightError::Request(format!(
            "Invalid color: {s} (use #RRGGBB, #AARRGGBB or a color name)"
        ))
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let val = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    match hex.len() {
        6 => Ok(0xFF00_0000 | val),
        8 => Ok(val),
        _ => Err(invalid()),
    }
}

/// Format a color as `#AARRGGBB`.
pub fn format_color(val: u32) -> String {
    format!("#{val:08X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_color ──

    #[test]
    fn parse_named() {
        assert_eq!(parse_color("red").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("green").unwrap(), 0xFF00_FF00);
        assert_eq!(parse_color("amber").unwrap(), 0xFFFF_BF00);
        assert_eq!(parse_color("off").unwrap(), 0);
        assert_eq!(parse_color("black").unwrap(), 0);
    }

    #[test]
    fn parse_named_case_insensitive() {
        assert_eq!(parse_color("RED").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("  White  ").unwrap(), 0xFFFF_FFFF);
    }

    #[test]
    fn parse_rgb_gets_opaque_alpha() {
        assert_eq!(parse_color("#00FF00").unwrap(), 0xFF00_FF00);
        assert_eq!(parse_color("607000").unwrap(), 0xFF60_7000);
    }

    #[test]
    fn parse_argb_keeps_alpha() {
        assert_eq!(parse_color("#0000FF00").unwrap(), 0x0000_FF00);
        assert_eq!(parse_color("0x80ff0000").unwrap(), 0x80FF_0000);
    }

    #[test]
    fn parse_invalid_lengths() {
        assert!(parse_color("#FFF").is_err());
        assert!(parse_color("#FF00000").is_err());
        assert!(parse_color("#FF0000000").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn parse_invalid_chars() {
        assert!(parse_color("#GGHHII").is_err());
        assert!(parse_color("+FF0000").is_err());
        assert!(parse_color("chartreuse").is_err());
    }

    // ── format_color ──

    #[test]
    fn format_pads_to_eight_digits() {
        assert_eq!(format_color(0xFFFF_0000), "#FFFF0000");
        assert_eq!(format_color(0x0000_FF00), "#0000FF00");
        assert_eq!(format_color(0), "#00000000");
    }

    #[test]
    fn format_then_parse_keeps_value() {
        let val = parse_color("#12AB34CD").unwrap();
        assert_eq!(format_color(val), "#12AB34CD");
    }
}
