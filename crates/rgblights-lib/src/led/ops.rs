//! Driving the RGB LED from a light state.
//!
//! Every write is best-effort: failures are logged and the remaining writes
//! still go out. Nothing here reports an error to the service caller.

use std::io;

use super::{Calibration, Channel, ChannelLayout, Rgb};
use crate::sysfs::{
    ATTR_BRIGHTNESS, ATTR_LUT_PWM, ATTR_PAUSE_HI_MULTI, ATTR_PAUSE_LO_MULTI, ATTR_START_BLINK,
    ATTR_STEP_DURATION, ATTR_SYNC_STATE, LedSysfs,
};
use crate::types::HwLightState;

/// Everything needed to reach and scale the three physical channels.
pub struct LedBank<'a, S: LedSysfs> {
    pub sysfs: &'a S,
    pub layout: &'a ChannelLayout,
    pub calibration: &'a Calibration,
}

impl<S: LedSysfs> LedBank<'_, S> {
    fn write(&self, led: &str, attr: &str, value: &str) -> bool {
        log_failure(led, attr, self.sysfs.write_attribute(led, attr, value))
    }

    fn write_control(&self, attr: &str, value: u32) -> bool {
        self.write(&self.layout.control, attr, &value.to_string())
    }
}

fn log_failure(led: &str, attr: &str, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("failed to write {led}/{attr}: {e}");
            false
        }
    }
}

/// Program one channel for hardware blinking.
///
/// Writes the PWM lookup pair, step duration, off time and on time in that
/// order. All four writes are attempted; returns true only if all succeeded.
pub fn set_led_blink<S: LedSysfs>(
    bank: &LedBank<'_, S>,
    channel: Channel,
    value: u32,
    on_ms: u32,
    off_ms: u32,
    mixed: bool,
) -> bool {
    let led = bank.layout.led(channel);
    let brightness = bank.calibration.scale(channel, value, mixed);

    let mut ok = bank.write(led, ATTR_LUT_PWM, &format!("{brightness},0"));
    ok &= bank.write(led, ATTR_STEP_DURATION, "0");
    ok &= bank.write(led, ATTR_PAUSE_LO_MULTI, &off_ms.to_string());
    ok &= bank.write(led, ATTR_PAUSE_HI_MULTI, &on_ms.to_string());
    ok
}

/// Set one channel to a steady, calibrated brightness.
pub fn set_led_brightness<S: LedSysfs>(
    bank: &LedBank<'_, S>,
    channel: Channel,
    value: u32,
    mixed: bool,
) -> bool {
    let brightness = bank.calibration.scale(channel, value, mixed);
    bank.write(bank.layout.led(channel), ATTR_BRIGHTNESS, &brightness.to_string())
}

/// Drive all three channels from `state`.
///
/// Returns true if every write succeeded. Callers treat the result as
/// informational only.
pub fn apply_state<S: LedSysfs>(bank: &LedBank<'_, S>, state: &HwLightState) -> bool {
    let rgb = Rgb::from_argb(state.color);
    let mixed = rgb.is_mixed();

    log::debug!(
        "apply color={:#010X} flash={} on={}ms off={}ms mixed={mixed}",
        state.color,
        state.flash_mode,
        state.flash_on_ms,
        state.flash_off_ms
    );

    let mut ok;
    if state.flash_mode.is_blinking() {
        ok = bank.write_control(ATTR_SYNC_STATE, 1);
        for ch in Channel::ALL {
            ok &= set_led_blink(
                bank,
                ch,
                rgb.component(ch),
                state.flash_on_ms,
                state.flash_off_ms,
                mixed,
            );
        }
        ok &= bank.write_control(ATTR_START_BLINK, 1);
    } else {
        ok = bank.write_control(ATTR_SYNC_STATE, 0);
        for ch in Channel::ALL {
            ok &= set_led_brightness(bank, ch, rgb.component(ch), mixed);
        }
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::LightParam;
    use crate::sysfs::mock::MockSysfs;
    use crate::types::FlashMode;

    fn calibration() -> Calibration {
        Calibration::new([
            LightParam {
                max_single_brightness: 200,
                max_mixed_brightness: 100,
            },
            LightParam {
                max_single_brightness: 255,
                max_mixed_brightness: 128,
            },
            LightParam {
                max_single_brightness: 255,
                max_mixed_brightness: 255,
            },
        ])
    }

    fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ── set_led_brightness ──

    #[test]
    fn brightness_is_scaled_single() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        assert!(set_led_brightness(&bank, Channel::Red, 255, false));
        assert_eq!(sysfs.get("red", ATTR_BRIGHTNESS).as_deref(), Some("200"));
    }

    #[test]
    fn brightness_is_scaled_mixed() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        set_led_brightness(&bank, Channel::Green, 255, true);
        assert_eq!(sysfs.get("green", ATTR_BRIGHTNESS).as_deref(), Some("128"));
    }

    // ── set_led_blink ──

    #[test]
    fn blink_writes_in_order() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        assert!(set_led_blink(&bank, Channel::Red, 255, 300, 700, false));
        assert_eq!(
            sysfs.journal(),
            entries(&[
                ("red/lut_pwm", "200,0"),
                ("red/step_duration", "0"),
                ("red/pause_lo_multi", "700"),
                ("red/pause_hi_multi", "300"),
            ])
        );
    }

    #[test]
    fn blink_attempts_all_writes_after_failure() {
        let sysfs = MockSysfs::new();
        sysfs.fail_writes_to("blue", ATTR_LUT_PWM);
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        assert!(!set_led_blink(&bank, Channel::Blue, 10, 1, 2, false));
        assert_eq!(sysfs.journal().len(), 4);
        assert_eq!(sysfs.get("blue", ATTR_PAUSE_HI_MULTI).as_deref(), Some("1"));
    }

    // ── apply_state ──

    #[test]
    fn apply_steady_sequence() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        assert!(apply_state(&bank, &HwLightState::steady(0xFF00_00FF)));
        assert_eq!(
            sysfs.journal(),
            entries(&[
                ("rgb/sync_state", "0"),
                ("red/brightness", "0"),
                ("green/brightness", "0"),
                ("blue/brightness", "255"),
            ])
        );
    }

    #[test]
    fn apply_steady_mixed_uses_mixed_ceiling() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        apply_state(&bank, &HwLightState::steady(0x00FF_FF00));
        assert_eq!(sysfs.get("red", ATTR_BRIGHTNESS).as_deref(), Some("100"));
        assert_eq!(sysfs.get("green", ATTR_BRIGHTNESS).as_deref(), Some("128"));
        assert_eq!(sysfs.get("blue", ATTR_BRIGHTNESS).as_deref(), Some("0"));
    }

    #[test]
    fn apply_timed_blink_sequence() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        let state = HwLightState::flashing(0x00FF_0000, FlashMode::Timed, 500, 1500);
        assert!(apply_state(&bank, &state));
        assert_eq!(
            sysfs.journal(),
            entries(&[
                ("rgb/sync_state", "1"),
                ("red/lut_pwm", "200,0"),
                ("red/step_duration", "0"),
                ("red/pause_lo_multi", "1500"),
                ("red/pause_hi_multi", "500"),
                ("green/lut_pwm", "0,0"),
                ("green/step_duration", "0"),
                ("green/pause_lo_multi", "1500"),
                ("green/pause_hi_multi", "500"),
                ("blue/lut_pwm", "0,0"),
                ("blue/step_duration", "0"),
                ("blue/pause_lo_multi", "1500"),
                ("blue/pause_hi_multi", "500"),
                ("rgb/start_blink", "1"),
            ])
        );
    }

    #[test]
    fn apply_timed_mixed_uses_mixed_ceiling() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        let state = HwLightState::flashing(0x00FF_FF00, FlashMode::Timed, 400, 600);
        assert!(apply_state(&bank, &state));
        assert_eq!(sysfs.get("red", ATTR_LUT_PWM).as_deref(), Some("100,0"));
        assert_eq!(sysfs.get("green", ATTR_LUT_PWM).as_deref(), Some("128,0"));
        assert_eq!(sysfs.get("blue", ATTR_LUT_PWM).as_deref(), Some("0,0"));
        assert_eq!(sysfs.get("red", ATTR_PAUSE_HI_MULTI).as_deref(), Some("400"));
        assert_eq!(sysfs.get("green", ATTR_PAUSE_LO_MULTI).as_deref(), Some("600"));
    }

    #[test]
    fn apply_hardware_blinks_like_timed() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        apply_state(
            &bank,
            &HwLightState::flashing(0x0000_FF00, FlashMode::Hardware, 100, 200),
        );
        assert_eq!(sysfs.writes_to("rgb", ATTR_SYNC_STATE), vec!["1"]);
        assert_eq!(sysfs.writes_to("rgb", ATTR_START_BLINK), vec!["1"]);
        assert_eq!(sysfs.get("green", ATTR_LUT_PWM).as_deref(), Some("255,0"));
        assert!(sysfs.writes_to("green", ATTR_BRIGHTNESS).is_empty());
    }

    #[test]
    fn apply_continues_after_control_failure() {
        let sysfs = MockSysfs::new();
        sysfs.fail_writes_to("rgb", ATTR_SYNC_STATE);
        let layout = ChannelLayout::default();
        let cal = calibration();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        assert!(!apply_state(&bank, &HwLightState::steady(0xFFFF_0000)));
        assert_eq!(sysfs.get("red", ATTR_BRIGHTNESS).as_deref(), Some("200"));
        assert_eq!(sysfs.journal().len(), 4);
    }

    #[test]
    fn apply_uses_custom_layout() {
        let sysfs = MockSysfs::new();
        let layout = ChannelLayout {
            control: "tricolor".into(),
            red: "r".into(),
            green: "g".into(),
            blue: "b".into(),
        };
        let cal = Calibration::default();
        let bank = LedBank {
            sysfs: &sysfs,
            layout: &layout,
            calibration: &cal,
        };

        apply_state(&bank, &HwLightState::steady(0xFF80_0000));
        assert_eq!(sysfs.get("tricolor", ATTR_SYNC_STATE).as_deref(), Some("0"));
        assert_eq!(sysfs.get("r", ATTR_BRIGHTNESS).as_deref(), Some("128"));
    }
}
