//! LED control — color decoding, calibration, and the sysfs apply routine.

mod calibration;
mod channel;
mod color;
mod ops;

pub use calibration::{Calibration, DEFAULT_MAX_BRIGHTNESS, LightParam};
pub use channel::{Channel, ChannelLayout};
pub use color::{Rgb, format_color, is_lit, parse_color};
pub use ops::{LedBank, apply_state, set_led_blink, set_led_brightness};
