//! Light identifiers and light state as exchanged with the framework.
//!
//! Ordinals match the `android.hardware.light` AIDL definitions so that a
//! binder adapter can pass raw integers straight through.

use std::fmt;

use serde::Serialize;

/// Logical light kinds known to the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightType {
    Backlight = 0,
    Keyboard = 1,
    Buttons = 2,
    Battery = 3,
    Notifications = 4,
    Attention = 5,
    Bluetooth = 6,
    Wifi = 7,
    Microphone = 8,
    Camera = 9,
}

impl LightType {
    pub const ALL: [LightType; 10] = [
        LightType::Backlight,
        LightType::Keyboard,
        LightType::Buttons,
        LightType::Battery,
        LightType::Notifications,
        LightType::Attention,
        LightType::Bluetooth,
        LightType::Wifi,
        LightType::Microphone,
        LightType::Camera,
    ];

    /// Wire ordinal of this light type.
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            LightType::Backlight => "BACKLIGHT",
            LightType::Keyboard => "KEYBOARD",
            LightType::Buttons => "BUTTONS",
            LightType::Battery => "BATTERY",
            LightType::Notifications => "NOTIFICATIONS",
            LightType::Attention => "ATTENTION",
            LightType::Bluetooth => "BLUETOOTH",
            LightType::Wifi => "WIFI",
            LightType::Microphone => "MICROPHONE",
            LightType::Camera => "CAMERA",
        }
    }
}

impl fmt::Display for LightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a light should flash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlashMode {
    #[default]
    None = 0,
    Timed = 1,
    Hardware = 2,
}

impl FlashMode {
    /// Decode a raw flash mode. Unknown values are treated as steady.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => FlashMode::Timed,
            2 => FlashMode::Hardware,
            _ => FlashMode::None,
        }
    }

    /// True for modes that ask the driver to blink.
    pub fn is_blinking(self) -> bool {
        matches!(self, FlashMode::Timed | FlashMode::Hardware)
    }

    pub fn name(self) -> &'static str {
        match self {
            FlashMode::None => "none",
            FlashMode::Timed => "timed",
            FlashMode::Hardware => "hardware",
        }
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FlashMode {
    type Err = crate::LightsError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "steady" => Ok(FlashMode::None),
            "timed" => Ok(FlashMode::Timed),
            "hardware" | "hw" => Ok(FlashMode::Hardware),
            other => Err(crate::LightsError::Config(format!(
                "unknown flash mode \"{other}\" (use none, timed or hardware)"
            ))),
        }
    }
}

/// A light advertised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HwLight {
    pub id: i32,
    pub ordinal: i32,
    #[serde(rename = "type")]
    pub light_type: LightType,
}

impl HwLight {
    /// Light whose id is the type ordinal, ordinal 0.
    pub fn of_type(light_type: LightType) -> Self {
        HwLight {
            id: light_type.id(),
            ordinal: 0,
            light_type,
        }
    }
}

/// Requested appearance of a logical light.
///
/// `color` is `0xAARRGGBB`; the alpha byte is ignored by this controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HwLightState {
    pub color: u32,
    pub flash_mode: FlashMode,
    pub flash_on_ms: u32,
    pub flash_off_ms: u32,
}

impl HwLightState {
    /// Steady light of the given color.
    pub fn steady(color: u32) -> Self {
        HwLightState {
            color,
            ..HwLightState::default()
        }
    }

    /// Blinking light of the given color and timing.
    pub fn flashing(color: u32, flash_mode: FlashMode, on_ms: u32, off_ms: u32) -> Self {
        HwLightState {
            color,
            flash_mode,
            flash_on_ms: on_ms,
            flash_off_ms: off_ms,
        }
    }
}
