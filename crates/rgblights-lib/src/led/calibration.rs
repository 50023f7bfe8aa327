//! Per-channel brightness ceilings read from the LED driver at startup.
//!
//! The driver publishes two ceilings per channel: one for when that channel
//! is the only one lit and a lower one for when several channels share the
//! current budget.

use serde::Serialize;

use super::{Channel, ChannelLayout};
use crate::sysfs::{ATTR_MAX_MIXED_BRIGHTNESS, ATTR_MAX_SINGLE_BRIGHTNESS, LedSysfs};

/// Full scale for an 8-bit channel; also the fallback ceiling.
pub const DEFAULT_MAX_BRIGHTNESS: u32 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LightParam {
    pub max_single_brightness: u32,
    pub max_mixed_brightness: u32,
}

impl LightParam {
    pub fn uniform(max: u32) -> Self {
        LightParam {
            max_single_brightness: max,
            max_mixed_brightness: max,
        }
    }

    /// Both ceilings limited to the 8-bit range.
    pub fn clamped(self) -> Self {
        LightParam {
            max_single_brightness: self.max_single_brightness.min(DEFAULT_MAX_BRIGHTNESS),
            max_mixed_brightness: self.max_mixed_brightness.min(DEFAULT_MAX_BRIGHTNESS),
        }
    }

    pub fn max_for(&self, mixed: bool) -> u32 {
        if mixed {
            self.max_mixed_brightness
        } else {
            self.max_single_brightness
        }
    }
}

/// Calibration table, one [`LightParam`] per channel. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Calibration {
    params: [LightParam; 3],
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::uniform(DEFAULT_MAX_BRIGHTNESS)
    }
}

impl Calibration {
    /// Ceilings above 255 are clamped.
    pub fn new(params: [LightParam; 3]) -> Self {
        Calibration {
            params: params.map(LightParam::clamped),
        }
    }

    pub fn uniform(max: u32) -> Self {
        Calibration::new([LightParam::uniform(max); 3])
    }

    /// Read both ceilings for every channel. Missing or unparseable
    /// attributes fall back to `default_max`.
    pub fn load(sysfs: &impl LedSysfs, layout: &ChannelLayout, default_max: u32) -> Self {
        let default_max = default_max.min(DEFAULT_MAX_BRIGHTNESS);
        let mut params = [LightParam::uniform(default_max); 3];
        for ch in Channel::ALL {
            let led = layout.led(ch);
            params[ch.index()] = LightParam {
                max_single_brightness: read_ceiling(
                    sysfs,
                    led,
                    ATTR_MAX_SINGLE_BRIGHTNESS,
                    default_max,
                ),
                max_mixed_brightness: read_ceiling(
                    sysfs,
                    led,
                    ATTR_MAX_MIXED_BRIGHTNESS,
                    default_max,
                ),
            };
        }
        Calibration { params }
    }

    pub fn param(&self, channel: Channel) -> LightParam {
        self.params[channel.index()]
    }

    /// Scale a requested 0–255 value against the channel's ceiling for the
    /// current mode. Truncates toward zero.
    pub fn scale(&self, channel: Channel, value: u32, mixed: bool) -> u32 {
        let scaled = u64::from(value) * u64::from(self.param(channel).max_for(mixed))
            / u64::from(DEFAULT_MAX_BRIGHTNESS);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

fn read_ceiling(sysfs: &impl LedSysfs, led: &str, attr: &str, default: u32) -> u32 {
    let contents = match sysfs.read_attribute(led, attr) {
        Ok(contents) => contents,
        Err(e) => {
            log::debug!("{led}/{attr} unavailable ({e}), using {default}");
            return default;
        }
    };
    match parse_leading_int(&contents) {
        Some(v) if v > DEFAULT_MAX_BRIGHTNESS => {
            log::warn!("{led}/{attr} = {v} exceeds {DEFAULT_MAX_BRIGHTNESS}, clamping");
            DEFAULT_MAX_BRIGHTNESS
        }
        Some(v) => v,
        None => {
            log::warn!(
                "{led}/{attr} has unparseable content {:?}, using {default}",
                contents.trim()
            );
            default
        }
    }
}

/// Parse the leading decimal integer of a sysfs value.
///
/// Leading whitespace and a `+` sign are accepted; anything after the digits
/// (typically a trailing newline) is ignored. Negative or digit-less input
/// yields `None`.
fn parse_leading_int(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysfs::mock::MockSysfs;

    // ── parse_leading_int ──

    #[test]
    fn parse_plain_and_trailing_newline() {
        assert_eq!(parse_leading_int("200"), Some(200));
        assert_eq!(parse_leading_int("200\n"), Some(200));
        assert_eq!(parse_leading_int("  42 mA\n"), Some(42));
        assert_eq!(parse_leading_int("+7"), Some(7));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("\n"), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-5"), None);
        assert_eq!(parse_leading_int("99999999999999"), None);
    }

    // ── load ──

    #[test]
    fn load_reads_each_channel() {
        let sysfs = MockSysfs::new();
        sysfs.set("red", ATTR_MAX_SINGLE_BRIGHTNESS, "200\n");
        sysfs.set("red", ATTR_MAX_MIXED_BRIGHTNESS, "100\n");
        sysfs.set("green", ATTR_MAX_SINGLE_BRIGHTNESS, "180\n");
        sysfs.set("green", ATTR_MAX_MIXED_BRIGHTNESS, "90\n");
        sysfs.set("blue", ATTR_MAX_SINGLE_BRIGHTNESS, "160\n");
        sysfs.set("blue", ATTR_MAX_MIXED_BRIGHTNESS, "80\n");

        let cal = Calibration::load(&sysfs, &ChannelLayout::default(), DEFAULT_MAX_BRIGHTNESS);
        assert_eq!(
            cal.param(Channel::Red),
            LightParam {
                max_single_brightness: 200,
                max_mixed_brightness: 100
            }
        );
        assert_eq!(cal.param(Channel::Green).max_mixed_brightness, 90);
        assert_eq!(cal.param(Channel::Blue).max_single_brightness, 160);
    }

    #[test]
    fn load_missing_files_default_to_full_scale() {
        let sysfs = MockSysfs::new();
        sysfs.set("green", ATTR_MAX_MIXED_BRIGHTNESS, "64");

        let cal = Calibration::load(&sysfs, &ChannelLayout::default(), DEFAULT_MAX_BRIGHTNESS);
        assert_eq!(cal.param(Channel::Red), LightParam::uniform(255));
        assert_eq!(cal.param(Channel::Green).max_single_brightness, 255);
        assert_eq!(cal.param(Channel::Green).max_mixed_brightness, 64);
        assert_eq!(cal.param(Channel::Blue), LightParam::uniform(255));
    }

    #[test]
    fn load_unparseable_falls_back() {
        let sysfs = MockSysfs::new();
        sysfs.set("red", ATTR_MAX_SINGLE_BRIGHTNESS, "n/a");
        let cal = Calibration::load(&sysfs, &ChannelLayout::default(), DEFAULT_MAX_BRIGHTNESS);
        assert_eq!(cal.param(Channel::Red).max_single_brightness, 255);
    }

    #[test]
    fn load_clamps_out_of_range() {
        let sysfs = MockSysfs::new();
        sysfs.set("blue", ATTR_MAX_SINGLE_BRIGHTNESS, "4095");
        let cal = Calibration::load(&sysfs, &ChannelLayout::default(), DEFAULT_MAX_BRIGHTNESS);
        assert_eq!(cal.param(Channel::Blue).max_single_brightness, 255);
    }

    #[test]
    fn load_honours_custom_default_and_layout() {
        let sysfs = MockSysfs::new();
        sysfs.set("led:red", ATTR_MAX_SINGLE_BRIGHTNESS, "10");
        let layout = ChannelLayout {
            red: "led:red".into(),
            ..ChannelLayout::default()
        };
        let cal = Calibration::load(&sysfs, &layout, 128);
        assert_eq!(cal.param(Channel::Red).max_single_brightness, 10);
        assert_eq!(cal.param(Channel::Red).max_mixed_brightness, 128);
        assert_eq!(cal.param(Channel::Green), LightParam::uniform(128));
    }

    // ── scale ──

    #[test]
    fn scale_bounds() {
        let cal = Calibration::new([
            LightParam {
                max_single_brightness: 200,
                max_mixed_brightness: 100,
            },
            LightParam::uniform(255),
            LightParam::uniform(0),
        ]);
        assert_eq!(cal.scale(Channel::Red, 0, false), 0);
        assert_eq!(cal.scale(Channel::Red, 255, false), 200);
        assert_eq!(cal.scale(Channel::Red, 255, true), 100);
        assert_eq!(cal.scale(Channel::Green, 255, true), 255);
        assert_eq!(cal.scale(Channel::Blue, 255, false), 0);
    }

    #[test]
    fn scale_truncates() {
        let cal = Calibration::uniform(100);
        // 128 * 100 / 255 = 50.19...
        assert_eq!(cal.scale(Channel::Green, 128, false), 50);
        // 1 * 100 / 255 = 0.39...
        assert_eq!(cal.scale(Channel::Green, 1, false), 0);
    }

    #[test]
    fn scale_is_monotonic_and_bounded() {
        for max in [0u32, 1, 77, 128, 254, 255] {
            let cal = Calibration::uniform(max);
            let mut prev = 0;
            for v in 0..=255u32 {
                let s = cal.scale(Channel::Red, v, false);
                assert!(s >= prev, "not monotonic at v={v}, max={max}");
                assert!(s <= max);
                prev = s;
            }
            assert_eq!(cal.scale(Channel::Red, 255, false), max);
        }
    }

    #[test]
    fn constructors_clamp_ceilings() {
        let cal = Calibration::uniform(u32::MAX);
        assert_eq!(cal.param(Channel::Red), LightParam::uniform(255));
        assert_eq!(cal.scale(Channel::Red, 255, true), 255);

        let cal = Calibration::new([
            LightParam {
                max_single_brightness: 20_000_000,
                max_mixed_brightness: 300,
            },
            LightParam::uniform(10),
            LightParam::uniform(255),
        ]);
        assert_eq!(cal.param(Channel::Red), LightParam::uniform(255));
        assert_eq!(cal.param(Channel::Green), LightParam::uniform(10));
        assert_eq!(cal.scale(Channel::Red, 255, false), 255);
    }

    #[test]
    fn scale_out_of_range_value_does_not_overflow() {
        let cal = Calibration::default();
        assert_eq!(cal.scale(Channel::Blue, u32::MAX, false), u32::MAX);
    }

    #[test]
    fn full_scale_is_identity() {
        let cal = Calibration::default();
        for v in [0u32, 1, 17, 128, 255] {
            assert_eq!(cal.scale(Channel::Blue, v, true), v);
        }
    }
}
