//! Controller configuration — TOML file describing where the LEDs live.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::led::{ChannelLayout, DEFAULT_MAX_BRIGHTNESS};
use crate::sysfs::DEFAULT_SYSFS_ROOT;

/// Default config location on the device.
pub const DEFAULT_CONFIG_PATH: &str = "/vendor/etc/rgblights/config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the LED class devices. Default: "/sys/class/leds".
    #[serde(default = "default_sysfs_root")]
    pub sysfs_root: String,

    /// LED group with the shared `sync_state` / `start_blink` controls. Default: "rgb".
    #[serde(default = "default_control_led")]
    pub control_led: String,

    #[serde(default = "default_red_led")]
    pub red_led: String,

    #[serde(default = "default_green_led")]
    pub green_led: String,

    #[serde(default = "default_blue_led")]
    pub blue_led: String,

    /// Ceiling used when the driver does not publish calibration. Default: 255.
    #[serde(default = "default_max_brightness")]
    pub default_max_brightness: u32,
}

fn default_sysfs_root() -> String {
    DEFAULT_SYSFS_ROOT.into()
}
fn default_control_led() -> String {
    "rgb".into()
}
fn default_red_led() -> String {
    "red".into()
}
fn default_green_led() -> String {
    "green".into()
}
fn default_blue_led() -> String {
    "blue".into()
}
fn default_max_brightness() -> u32 {
    DEFAULT_MAX_BRIGHTNESS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sysfs_root: default_sysfs_root(),
            control_led: default_control_led(),
            red_led: default_red_led(),
            green_led: default_green_led(),
            blue_led: default_blue_led(),
            default_max_brightness: default_max_brightness(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `sysfs_root` is empty or whitespace-only.
    EmptySysfsRoot,
    /// An LED name is empty (`field` names the offending key).
    EmptyLedName { field: &'static str },
    /// An LED name contains a path separator.
    InvalidLedName { field: &'static str, name: String },
    /// Two channels point at the same LED.
    DuplicateLedName(String),
    /// `default_max_brightness` is above 255.
    MaxBrightnessOutOfRange(u32),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptySysfsRoot => write!(f, "sysfs_root cannot be empty"),
            ValidationError::EmptyLedName { field } => write!(f, "{field} cannot be empty"),
            ValidationError::InvalidLedName { field, name } => {
                write!(f, "Invalid {field}: \"{name}\" must not contain '/'")
            }
            ValidationError::DuplicateLedName(name) => {
                write!(f, "LED \"{name}\" is assigned to more than one channel")
            }
            ValidationError::MaxBrightnessOutOfRange(v) => write!(
                f,
                "default_max_brightness {v} is out of range (0-{DEFAULT_MAX_BRIGHTNESS})"
            ),
        }
    }
}

impl Config {
    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from `path`, logging parse warnings.
    pub fn load(path: &Path) -> Self {
        let (config, warnings) = Self::load_from(path);
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Channel directory names as a [`ChannelLayout`].
    pub fn layout(&self) -> ChannelLayout {
        ChannelLayout {
            control: self.control_led.trim().to_string(),
            red: self.red_led.trim().to_string(),
            green: self.green_led.trim().to_string(),
            blue: self.blue_led.trim().to_string(),
        }
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.sysfs_root.trim().is_empty() {
            errors.push(ValidationError::EmptySysfsRoot);
        }

        let fields: [(&'static str, &str); 4] = [
            ("control_led", self.control_led.as_str()),
            ("red_led", self.red_led.as_str()),
            ("green_led", self.green_led.as_str()),
            ("blue_led", self.blue_led.as_str()),
        ];
        for (field, name) in fields {
            let name = name.trim();
            if name.is_empty() {
                errors.push(ValidationError::EmptyLedName { field });
            } else if name.contains('/') {
                errors.push(ValidationError::InvalidLedName {
                    field,
                    name: name.to_string(),
                });
            }
        }

        // Channels must be distinct; the control group may not alias one either.
        let mut seen = HashSet::new();
        for (_, name) in fields {
            let name = name.trim();
            if !name.is_empty() && !seen.insert(name) {
                errors.push(ValidationError::DuplicateLedName(name.to_string()));
            }
        }

        if self.default_max_brightness > DEFAULT_MAX_BRIGHTNESS {
            errors.push(ValidationError::MaxBrightnessOutOfRange(
                self.default_max_brightness,
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Like [`Config::validate`], folded into a single [`crate::LightsError::Config`].
    pub fn check(&self) -> crate::error::Result<()> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            crate::LightsError::Config(msgs.join("; "))
        })
    }
}
