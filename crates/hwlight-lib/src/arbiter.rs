//! Light arbiter: owns the shared two-color LED and the logical states competing for it.
//!
//! Notification, attention and battery all render on the same red/green LED.
//! Every update stores the new state and re-resolves which one is shown,
//! by fixed priority (notification > attention > battery), under one lock.
//! The backlight shares the lock but not the resolution.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::Config;
use crate::device::{self, LedOutputs, SysfsOutputs};
use crate::error::{HwLightError, Result};
use crate::led::{self, LedProgram, LedSource};
use crate::types::{HwLight, LightRole, LightState};

/// Last requested state of each light sharing the LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SharedStates {
    pub attention: LightState,
    pub battery: LightState,
    pub notification: LightState,
}

impl SharedStates {
    /// The state that should be shown, by priority; off if none is lit.
    pub fn resolve(&self) -> LightState {
        [self.notification, self.attention, self.battery]
            .into_iter()
            .find(LightState::is_lit)
            .unwrap_or_default()
    }

    /// The program for the currently winning state.
    pub fn program(&self) -> LedProgram {
        let selected = self.resolve();
        let source = LedSource::identify(&selected, &self.battery, &self.notification);
        let program = LedProgram::compute(&selected, source);
        let (on_ms, off_ms) = selected.effective_flash();
        log::debug!(
            "shared led: mode={:?} source={} color={:#010x} on={on_ms} off={off_ms} \
             breath={} red={} green={}",
            selected.flash_mode,
            source.name(),
            selected.color,
            program.breath,
            program.red,
            program.green
        );
        program
    }
}

struct Inner<O> {
    states: SharedStates,
    outputs: O,
}

/// The lights service: dispatches requests to the backlight or the shared LED.
pub struct Lights<O: LedOutputs> {
    inner: Mutex<Inner<O>>,
    max_brightness: u32,
}

impl<O: LedOutputs> Lights<O> {
    /// Create the service around already-open outputs.
    ///
    /// `max_brightness` is the backlight's maximum, read once at startup.
    pub fn new(outputs: O, max_brightness: u32) -> Self {
        Lights {
            inner: Mutex::new(Inner {
                states: SharedStates::default(),
                outputs,
            }),
            max_brightness,
        }
    }

    /// Backlight maximum brightness this instance scales to.
    pub fn max_brightness(&self) -> u32 {
        self.max_brightness
    }

    fn lock(&self) -> MutexGuard<'_, Inner<O>> {
        self.inner.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            log::warn!("lights lock poisoned, recovering last stored states");
            poisoned.into_inner()
        })
    }

    /// Service boundary: set the state of the light with platform id `id`.
    ///
    /// Fails with [`HwLightError::UnsupportedOperation`] for ids this device
    /// does not track; nothing is stored or written in that case.
    pub fn set_light_state(&self, id: i32, state: LightState) -> Result<()> {
        let role = LightRole::from_id(id).ok_or(HwLightError::UnsupportedOperation(id))?;
        self.set_light(role, state)
    }

    /// Set the state of a tracked light.
    pub fn set_light(&self, role: LightRole, state: LightState) -> Result<()> {
        match role {
            LightRole::Backlight => {
                let mut inner = self.lock();
                led::set_backlight(&mut inner.outputs, state.color, self.max_brightness)?;
            }
            // No buttons LED on this hardware.
            LightRole::Buttons => {}
            LightRole::Attention | LightRole::Battery | LightRole::Notification => {
                let mut inner = self.lock();
                match role {
                    LightRole::Attention => inner.states.attention = state,
                    LightRole::Battery => inner.states.battery = state,
                    _ => inner.states.notification = state,
                }
                apply_locked(&mut *inner)?;
            }
        }
        Ok(())
    }

    /// Every light this device tracks, in ascending id order.
    pub fn get_lights(&self) -> Vec<HwLight> {
        tracked_lights()
    }

    /// Snapshot of the stored shared-LED states.
    pub fn shared_states(&self) -> SharedStates {
        self.lock().states
    }

    /// Re-issue the full program for the current states.
    ///
    /// Writes are one-shot; this repairs the LED after a failed write.
    pub fn reapply(&self) -> Result<()> {
        let mut inner = self.lock();
        apply_locked(&mut *inner)?;
        Ok(())
    }
}

impl Lights<SysfsOutputs> {
    /// Open the control files named in `config` and read the backlight maximum.
    ///
    /// Fails if any output cannot be opened; an unreadable maximum falls back to 255.
    pub fn open(config: &Config) -> device::Result<Self> {
        let outputs = SysfsOutputs::open(config)?;
        let max_brightness = device::read_max_brightness(Path::new(&config.backlight_max_path));
        log::debug!("backlight max brightness {max_brightness}");
        Ok(Lights::new(outputs, max_brightness))
    }
}

/// Lights exposed by this device. Does not depend on any device state.
pub fn tracked_lights() -> Vec<HwLight> {
    LightRole::ALL.into_iter().map(HwLight::from).collect()
}

fn apply_locked<O: LedOutputs>(inner: &mut Inner<O>) -> device::Result<()> {
    let program = inner.states.program();
    led::apply_program(&mut inner.outputs, &program)
}
