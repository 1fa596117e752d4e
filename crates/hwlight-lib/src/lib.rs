//! hwlight: logical light arbitration for sysfs-driven two-color LEDs.

pub mod arbiter;
pub mod brightness;
pub mod config;
pub mod device;
pub mod error;
pub mod led;
pub mod service;
pub mod types;

pub use arbiter::Lights;
pub use error::HwLightError;
pub use types::{FlashMode, HwLight, LightRole, LightState};
