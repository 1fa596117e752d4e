//! Unified error type for the hwlight-lib crate.
//!
//! [`HwLightError`] wraps device output errors and the service-level error
//! kinds (`UnsupportedOperation`, `Config`, `Request`). `From` impls allow
//! `?` to propagate across module boundaries.

use std::fmt;

use crate::device::DeviceError;

/// Unified error type for hwlight-lib operations.
#[derive(Debug)]
pub enum HwLightError {
    /// A control file could not be opened or written.
    Device(DeviceError),
    /// Standard I/O error (config persistence, request stream).
    Io(std::io::Error),
    /// The requested light id is not controlled by this device.
    UnsupportedOperation(i32),
    /// Configuration validation error.
    Config(String),
    /// Malformed service request.
    Request(String),
}

impl fmt::Display for HwLightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HwLightError::Device(e) => write!(f, "{e}"),
            HwLightError::Io(e) => write!(f, "I/O error: {e}"),
            HwLightError::UnsupportedOperation(id) => {
                write!(f, "Unsupported operation: light {id} is not controlled by this device")
            }
            HwLightError::Config(e) => write!(f, "Config error: {e}"),
            HwLightError::Request(e) => write!(f, "Request error: {e}"),
        }
    }
}

impl std::error::Error for HwLightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HwLightError::Device(e) => Some(e),
            HwLightError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeviceError> for HwLightError {
    fn from(e: DeviceError) -> Self {
        HwLightError::Device(e)
    }
}

impl From<std::io::Error> for HwLightError {
    fn from(e: std::io::Error) -> Self {
        HwLightError::Io(e)
    }
}

/// Crate-level Result alias using [`HwLightError`].
pub type Result<T> = std::result::Result<T, HwLightError>;
