//! Light controller — battery/notification arbitration over one RGB LED.
//!
//! The battery light wins whenever it is lit; otherwise the notification
//! light (lit or not) drives the LED. Each `set_light_state` call stores,
//! arbitrates and applies under a single lock so concurrent callers can
//! never leave the channels half-programmed.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::error::{LightsError, Result};
use crate::led::{self, Calibration, ChannelLayout, LedBank};
use crate::sysfs::LedSysfs;
use crate::types::{HwLight, HwLightState, LightType};

/// Lights this controller drives, in the order they are reported.
pub const SUPPORTED_LIGHTS: [LightType; 2] = [LightType::Battery, LightType::Notifications];

/// Host-facing light service interface.
pub trait Lights {
    /// Lights this service accepts in [`Lights::set_light_state`].
    fn get_lights(&self) -> Vec<HwLight>;

    /// Store the state for light `id` and update the hardware.
    ///
    /// Fails with [`LightsError::UnsupportedOperation`] for unknown ids.
    /// Hardware write failures are not reported.
    fn set_light_state(&self, id: i32, state: &HwLightState) -> Result<()>;
}

/// Last requested state for each logical light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoredStates {
    pub battery: HwLightState,
    pub notification: HwLightState,
}

impl StoredStates {
    /// Which light currently owns the LED.
    pub fn active(&self) -> LightType {
        if led::is_lit(self.battery.color) {
            LightType::Battery
        } else {
            LightType::Notifications
        }
    }

    /// State of the light that currently owns the LED.
    pub fn effective(&self) -> &HwLightState {
        match self.active() {
            LightType::Battery => &self.battery,
            _ => &self.notification,
        }
    }
}

pub struct LightController<S: LedSysfs> {
    sysfs: S,
    layout: ChannelLayout,
    calibration: Calibration,
    states: Mutex<StoredStates>,
}

impl<S: LedSysfs> LightController<S> {
    /// Build a controller, reading calibration from the driver.
    pub fn new(sysfs: S, layout: ChannelLayout, default_max_brightness: u32) -> Self {
        let calibration = Calibration::load(&sysfs, &layout, default_max_brightness);
        log::info!("light controller ready: {calibration:?}");
        Self::with_calibration(sysfs, layout, calibration)
    }

    /// Build a controller with a known calibration table.
    pub fn with_calibration(sysfs: S, layout: ChannelLayout, calibration: Calibration) -> Self {
        LightController {
            sysfs,
            layout,
            calibration,
            states: Mutex::new(StoredStates::default()),
        }
    }

    pub fn sysfs(&self) -> &S {
        &self.sysfs
    }

    pub fn layout(&self) -> &ChannelLayout {
        &self.layout
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn battery_state(&self) -> HwLightState {
        self.lock_states().battery
    }

    pub fn notification_state(&self) -> HwLightState {
        self.lock_states().notification
    }

    pub fn states(&self) -> StoredStates {
        *self.lock_states()
    }

    /// Light that currently owns the LED.
    pub fn active_light(&self) -> LightType {
        self.lock_states().active()
    }

    // Stored states are plain `Copy` data, so a poisoned lock still holds a valid value.
    fn lock_states(&self) -> MutexGuard<'_, StoredStates> {
        self.states.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn bank(&self) -> LedBank<'_, S> {
        LedBank {
            sysfs: &self.sysfs,
            layout: &self.layout,
            calibration: &self.calibration,
        }
    }

    /// Must be called with the state lock held.
    fn handle_battery_notification(&self, states: &StoredStates) {
        let active = states.active();
        log::debug!("{active} light owns the LED");
        if !led::apply_state(&self.bank(), states.effective()) {
            log::warn!("some LED writes failed while applying the {active} light");
        }
    }
}

impl<S: LedSysfs> Lights for LightController<S> {
    fn get_lights(&self) -> Vec<HwLight> {
        SUPPORTED_LIGHTS.into_iter().map(HwLight::of_type).collect()
    }

    fn set_light_state(&self, id: i32, state: &HwLightState) -> Result<()> {
        let mut states = self.lock_states();
        match LightType::from_id(id) {
            Some(LightType::Battery) => states.battery = *state,
            Some(LightType::Notifications) => states.notification = *state,
            _ => {
                log::debug!("rejecting light id {id}");
                return Err(LightsError::UnsupportedOperation(id));
            }
        }
        self.handle_battery_notification(&states);
        Ok(())
    }
}
