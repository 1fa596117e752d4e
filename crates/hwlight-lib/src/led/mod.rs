//! LED control: program computation and output writes for the shared LED.

mod color;
mod ops;
mod program;

pub use color::{format_color, parse_color};
pub use ops::{apply_program, set_backlight};
pub use program::{LedProgram, LedSource};
