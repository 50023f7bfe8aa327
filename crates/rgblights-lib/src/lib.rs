//! rgblights — battery and notification light controller for sysfs RGB LED drivers.

pub mod config;
pub mod error;
pub mod led;
pub mod service;
pub mod sysfs;
pub mod types;

pub use error::LightsError;
pub use service::{LightController, Lights};
