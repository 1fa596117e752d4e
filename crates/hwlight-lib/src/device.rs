//! Device outputs: trait + sysfs backend.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::brightness::{REFERENCE_MAX_BRIGHTNESS, parse_max_brightness};
use crate::config::Config;

// ── Sinks ──

/// One physical control file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sink {
    Backlight,
    RedBreath,
    RedLevel,
    GreenBreath,
    GreenLevel,
}

impl Sink {
    pub const ALL: [Sink; 5] = [
        Sink::Backlight,
        Sink::RedBreath,
        Sink::RedLevel,
        Sink::GreenBreath,
        Sink::GreenLevel,
    ];

    /// Path of this sink in the given config.
    pub fn path(self, config: &Config) -> &str {
        match self {
            Sink::Backlight => &config.backlight_path,
            Sink::RedBreath => &config.red_breath_path,
            Sink::RedLevel => &config.red_path,
            Sink::GreenBreath => &config.green_breath_path,
            Sink::GreenLevel => &config.green_path,
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sink::Backlight => "backlight",
            Sink::RedBreath => "red breath",
            Sink::RedLevel => "red",
            Sink::GreenBreath => "green breath",
            Sink::GreenLevel => "green",
        };
        f.write_str(name)
    }
}

// ── Error type ──

/// Device output errors. Each carries the sink, its path and the OS error.
#[derive(Debug)]
pub enum DeviceError {
    OpenFailed {
        sink: Sink,
        path: PathBuf,
        source: std::io::Error,
    },
    WriteFailed {
        sink: Sink,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DeviceError {
    /// Underlying OS error code, if the failure came from a system call.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            DeviceError::OpenFailed { source, .. } | DeviceError::WriteFailed { source, .. } => {
                source.raw_os_error()
            }
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::OpenFailed { sink, path, source } => {
                write!(f, "Failed to open {sink} ({}): {source}", path.display())
            }
            DeviceError::WriteFailed { sink, path, source } => {
                write!(f, "Failed to write {sink} ({}): {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeviceError::OpenFailed { source, .. } | DeviceError::WriteFailed { source, .. } => {
                Some(source)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;

// ── Trait ──

/// Write access to the physical control files.
///
/// Every write fully replaces the sink's content with `value`.
pub trait LedOutputs: Send {
    fn write(&mut self, sink: Sink, value: u32) -> Result<()>;
}

// ── sysfs backend ──

/// Control files under `/sys/class/leds` (or wherever the config points).
///
/// Files are reopened for every write with truncation, so each write is a
/// complete `"<value>\n"` replacement.
#[derive(Debug, Clone)]
pub struct SysfsOutputs {
    backlight: PathBuf,
    red_breath: PathBuf,
    red: PathBuf,
    green_breath: PathBuf,
    green: PathBuf,
}

impl SysfsOutputs {
    /// Check that every sink can be opened for writing.
    ///
    /// Fails with the first sink that cannot be opened; nothing is written.
    pub fn open(config: &Config) -> Result<Self> {
        for sink in Sink::ALL {
            let path = Path::new(sink.path(config));
            OpenOptions::new()
                .write(true)
                .open(path)
                .map_err(|source| DeviceError::OpenFailed {
                    sink,
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        Ok(SysfsOutputs {
            backlight: config.backlight_path.clone().into(),
            red_breath: config.red_breath_path.clone().into(),
            red: config.red_path.clone().into(),
            green_breath: config.green_breath_path.clone().into(),
            green: config.green_path.clone().into(),
        })
    }

    fn sink_path(&self, sink: Sink) -> &Path {
        match sink {
            Sink::Backlight => &self.backlight,
            Sink::RedBreath => &self.red_breath,
            Sink::RedLevel => &self.red,
            Sink::GreenBreath => &self.green_breath,
            Sink::GreenLevel => &self.green,
        }
    }
}

impl LedOutputs for SysfsOutputs {
    fn write(&mut self, sink: Sink, value: u32) -> Result<()> {
        let path = self.sink_path(sink);
        let wrap = |source| DeviceError::WriteFailed {
            sink,
            path: path.to_path_buf(),
            source,
        };
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(wrap)?;
        file.write_all(format!("{value}\n").as_bytes())
            .map_err(wrap)?;
        Ok(())
    }
}

/// Read the backlight's maximum brightness, falling back to 255.
pub fn read_max_brightness(path: &Path) -> u32 {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_max_brightness(&contents).unwrap_or_else(|| {
            log::warn!(
                "invalid max brightness {:?} in {}, using {REFERENCE_MAX_BRIGHTNESS}",
                contents.trim(),
                path.display()
            );
            REFERENCE_MAX_BRIGHTNESS
        }),
        Err(e) => {
            log::warn!(
                "cannot read {} ({e}), using {REFERENCE_MAX_BRIGHTNESS}",
                path.display()
            );
            REFERENCE_MAX_BRIGHTNESS
        }
    }
}

// ── Mock ──

pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex, PoisonError};

    /// In-memory outputs for tests. Records every write in order.
    ///
    /// Clones share the same log, so a test can keep a handle after moving
    /// the outputs into an arbiter.
    #[derive(Debug, Clone, Default)]
    pub struct MockOutputs {
        writes: Arc<Mutex<Vec<(Sink, u32)>>>,
        fail_on: Arc<Mutex<Option<Sink>>>,
    }

    impl MockOutputs {
        pub fn new() -> Self {
            Self::default()
        }

        /// All writes so far, oldest first.
        pub fn writes(&self) -> Vec<(Sink, u32)> {
            self.writes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Drain and return the recorded writes.
        pub fn take(&self) -> Vec<(Sink, u32)> {
            std::mem::take(&mut *self.writes.lock().unwrap_or_else(PoisonError::into_inner))
        }

        /// Last value written to `sink`, if any.
        pub fn last(&self, sink: Sink) -> Option<u32> {
            self.writes()
                .iter()
                .rev()
                .find(|(s, _)| *s == sink)
                .map(|&(_, v)| v)
        }

        /// Make writes to `sink` fail (or clear the injection with `None`).
        pub fn fail_on(&self, sink: Option<Sink>) {
            *self.fail_on.lock().unwrap_or_else(PoisonError::into_inner) = sink;
        }
    }

    impl LedOutputs for MockOutputs {
        fn write(&mut self, sink: Sink, value: u32) -> Result<()> {
            if *self.fail_on.lock().unwrap_or_else(PoisonError::into_inner) == Some(sink) {
                return Err(DeviceError::WriteFailed {
                    sink,
                    path: PathBuf::from(format!("mock://{sink}")),
                    source: std::io::Error::other("mock: write failure injected"),
                });
            }
            self.writes
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((sink, value));
            Ok(())
        }
    }
}
