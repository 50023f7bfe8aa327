//! LED class attribute access — trait + sysfs backend.
//!
//! Attributes are addressed as `<led>/<attr>` below a root directory,
//! normally `/sys/class/leds`.

use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_SYSFS_ROOT: &str = "/sys/class/leds";

// ── Attribute names ──

pub const ATTR_MAX_SINGLE_BRIGHTNESS: &str = "max_single_brightness";
pub const ATTR_MAX_MIXED_BRIGHTNESS: &str = "max_mixed_brightness";
pub const ATTR_SYNC_STATE: &str = "sync_state";
pub const ATTR_START_BLINK: &str = "start_blink";
pub const ATTR_LUT_PWM: &str = "lut_pwm";
pub const ATTR_STEP_DURATION: &str = "step_duration";
pub const ATTR_PAUSE_LO_MULTI: &str = "pause_lo_multi";
pub const ATTR_PAUSE_HI_MULTI: &str = "pause_hi_multi";
pub const ATTR_BRIGHTNESS: &str = "brightness";

// ── Trait ──

pub trait LedSysfs {
    /// Read the full contents of `<led>/<attr>`.
    fn read_attribute(&self, led: &str, attr: &str) -> io::Result<String>;
    /// Replace the contents of `<led>/<attr>` with `value`.
    fn write_attribute(&self, led: &str, attr: &str, value: &str) -> io::Result<()>;
}

// ── Filesystem backend ──

/// LED class attributes on a real (or fake, for tests) directory tree.
#[derive(Debug, Clone)]
pub struct SysfsLeds {
    root: PathBuf,
}

impl SysfsLeds {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SysfsLeds { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn attribute_path(&self, led: &str, attr: &str) -> PathBuf {
        self.root.join(led).join(attr)
    }
}

impl Default for SysfsLeds {
    fn default() -> Self {
        Self::new(DEFAULT_SYSFS_ROOT)
    }
}

impl LedSysfs for SysfsLeds {
    fn read_attribute(&self, led: &str, attr: &str) -> io::Result<String> {
        std::fs::read_to_string(self.attribute_path(led, attr))
    }

    fn write_attribute(&self, led: &str, attr: &str, value: &str) -> io::Result<()> {
        let path = self.attribute_path(led, attr);
        log::debug!("write {} = {value}", path.display());
        std::fs::write(&path, value)
    }
}

// ── Mock backend for testing ──

/// In-memory attribute store for unit and integration tests.
///
/// Always compiled, hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// Attribute key: `"<led>/<attr>"`.
    pub fn key(led: &str, attr: &str) -> String {
        format!("{led}/{attr}")
    }

    /// In-memory sysfs. Stores attribute contents keyed by `"<led>/<attr>"`
    /// and journals every write attempt (including failed ones) in order.
    #[derive(Default)]
    pub struct MockSysfs {
        /// Attribute storage: `"<led>/<attr>"` → contents.
        pub attributes: Mutex<HashMap<String, String>>,
        /// Every write attempt in call order: (`"<led>/<attr>"`, value).
        pub writes: Mutex<Vec<(String, String)>>,
        /// Attributes whose writes fail with `PermissionDenied`.
        pub failing: Mutex<HashSet<String>>,
    }

    impl MockSysfs {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed an attribute value (e.g. calibration files).
        pub fn set(&self, led: &str, attr: &str, value: &str) {
            lock(&self.attributes).insert(key(led, attr), value.to_string());
        }

        /// Current contents of an attribute, if ever written or seeded.
        pub fn get(&self, led: &str, attr: &str) -> Option<String> {
            lock(&self.attributes).get(&key(led, attr)).cloned()
        }

        /// Make every write to `<led>/<attr>` fail.
        pub fn fail_writes_to(&self, led: &str, attr: &str) {
            lock(&self.failing).insert(key(led, attr));
        }

        /// Snapshot of the write journal.
        pub fn journal(&self) -> Vec<(String, String)> {
            lock(&self.writes).clone()
        }

        /// Forget all journaled writes (attribute contents are kept).
        pub fn clear_journal(&self) {
            lock(&self.writes).clear();
        }

        /// Values written to one attribute, oldest first.
        pub fn writes_to(&self, led: &str, attr: &str) -> Vec<String> {
            let k = key(led, attr);
            lock(&self.writes)
                .iter()
                .filter(|(path, _)| *path == k)
                .map(|(_, v)| v.clone())
                .collect()
        }
    }

    fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        m.lock().unwrap_or_else(|e| e.into_inner())
    }

    impl LedSysfs for MockSysfs {
        fn read_attribute(&self, led: &str, attr: &str) -> io::Result<String> {
            lock(&self.attributes)
                .get(&key(led, attr))
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, key(led, attr)))
        }

        fn write_attribute(&self, led: &str, attr: &str, value: &str) -> io::Result<()> {
            let k = key(led, attr);
            lock(&self.writes).push((k.clone(), value.to_string()));
            if lock(&self.failing).contains(&k) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("mock: write failure injected for {k}"),
                ));
            }
            lock(&self.attributes).insert(k, value.to_string());
            Ok(())
        }
    }
}
