//! Brightness scaling: packed color to luminance, reference range to device range.

/// Reference maximum brightness that requests are expressed in.
pub const REFERENCE_MAX_BRIGHTNESS: u32 = 255;

/// Perceptual luminance of the RGB part of a packed `0xAARRGGBB` color.
///
/// Integer luma weights `(77 R + 150 G + 29 B) >> 8`; the top byte is ignored.
pub fn to_luminance(color: u32) -> u32 {
    let r = (color >> 16) & 0xFF;
    let g = (color >> 8) & 0xFF;
    let b = color & 0xFF;
    (77 * r + 150 * g + 29 * b) >> 8
}

/// Rescale a luminance from `0..=255` to `0..=device_max`, truncating.
///
/// Returns `luminance` untouched when the device already uses the reference range.
pub fn scale_to_device_range(luminance: u32, device_max: u32) -> u32 {
    if device_max == REFERENCE_MAX_BRIGHTNESS {
        return luminance;
    }
    (u64::from(luminance) * u64::from(device_max) / u64::from(REFERENCE_MAX_BRIGHTNESS)) as u32
}

/// Backlight level to write for a packed color on a device with `device_max`.
pub fn backlight_level(color: u32, device_max: u32) -> u32 {
    scale_to_device_range(to_luminance(color), device_max)
}

/// Parse the contents of a `max_brightness` file.
///
/// Returns `None` for empty, non-numeric or zero values.
pub fn parse_max_brightness(contents: &str) -> Option<u32> {
    contents.trim().parse::<u32>().ok().filter(|&v| v > 0)
}
