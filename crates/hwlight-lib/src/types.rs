//! Light roles and requested light states.
//!
//! Role and flash-mode ids follow the platform light-type numbering so that
//! requests coming over the service boundary can be mapped without a table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical light a client can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightRole {
    Backlight,
    Buttons,
    Battery,
    Notification,
    Attention,
}

impl LightRole {
    /// Every role this device tracks, in ascending id order.
    pub const ALL: [LightRole; 5] = [
        LightRole::Backlight,
        LightRole::Buttons,
        LightRole::Battery,
        LightRole::Notification,
        LightRole::Attention,
    ];

    /// Platform light-type id.
    pub fn id(self) -> i32 {
        match self {
            LightRole::Backlight => 0,
            LightRole::Buttons => 2,
            LightRole::Battery => 3,
            LightRole::Notification => 4,
            LightRole::Attention => 5,
        }
    }

    /// Map a platform light-type id to a tracked role.
    ///
    /// Returns `None` for ids this device does not control (keyboard,
    /// bluetooth, wifi, microphone, ...).
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(LightRole::Backlight),
            2 => Some(LightRole::Buttons),
            3 => Some(LightRole::Battery),
            4 => Some(LightRole::Notification),
            5 => Some(LightRole::Attention),
            _ => None,
        }
    }

    /// Parse a role name (case-insensitive) or numeric id.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i32>() {
            return Self::from_id(id);
        }
        match s.to_lowercase().as_str() {
            "backlight" | "lcd" => Some(LightRole::Backlight),
            "buttons" => Some(LightRole::Buttons),
            "battery" => Some(LightRole::Battery),
            "notification" | "notifications" => Some(LightRole::Notification),
            "attention" => Some(LightRole::Attention),
            _ => None,
        }
    }
}

impl fmt::Display for LightRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightRole::Backlight => "backlight",
            LightRole::Buttons => "buttons",
            LightRole::Battery => "battery",
            LightRole::Notification => "notification",
            LightRole::Attention => "attention",
        };
        f.write_str(name)
    }
}

/// How a light should flash.
///
/// `Hardware` exists in the platform protocol but is handled like `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashMode {
    #[default]
    None,
    Timed,
    Hardware,
}

/// Requested visual state for one logical light.
///
/// `color` is packed `0xAARRGGBB`. The default value is "light off".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LightState {
    pub color: u32,
    pub flash_mode: FlashMode,
    pub flash_on_ms: u32,
    pub flash_off_ms: u32,
}

impl LightState {
    /// A steady (non-flashing) state of the given color.
    pub fn solid(color: u32) -> Self {
        LightState {
            color,
            ..Default::default()
        }
    }

    /// A timed flashing state.
    pub fn timed(color: u32, on_ms: u32, off_ms: u32) -> Self {
        LightState {
            color,
            flash_mode: FlashMode::Timed,
            flash_on_ms: on_ms,
            flash_off_ms: off_ms,
        }
    }

    /// Whether any RGB channel is nonzero. The top byte is ignored.
    pub fn is_lit(&self) -> bool {
        self.color & 0x00FF_FFFF != 0
    }

    /// On/off durations that actually apply: zero unless the mode is `Timed`.
    pub fn effective_flash(&self) -> (u32, u32) {
        match self.flash_mode {
            FlashMode::Timed => (self.flash_on_ms, self.flash_off_ms),
            FlashMode::None | FlashMode::Hardware => (0, 0),
        }
    }
}

/// Entry returned by light enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HwLight {
    pub id: i32,
    #[serde(rename = "type")]
    pub role: LightRole,
    pub ordinal: i32,
}

impl From<LightRole> for HwLight {
    fn from(role: LightRole) -> Self {
        HwLight {
            id: role.id(),
            role,
            ordinal: 0,
        }
    }
}
