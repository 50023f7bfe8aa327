//! Physical LED channels and their sysfs directory names.

use std::fmt;

use serde::Serialize;

/// One color channel of the RGB LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Channels in the order the driver expects them to be programmed.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// LED class directory names for each channel plus the shared control group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelLayout {
    /// Group holding `sync_state` and `start_blink`.
    pub control: String,
    pub red: String,
    pub green: String,
    pub blue: String,
}

impl ChannelLayout {
    pub fn led(&self, channel: Channel) -> &str {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }
}

impl Default for ChannelLayout {
    fn default() -> Self {
        ChannelLayout {
            control: "rgb".into(),
            red: "red".into(),
            green: "green".into(),
            blue: "blue".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_red_green_blue() {
        assert_eq!(Channel::ALL, [Channel::Red, Channel::Green, Channel::Blue]);
        assert_eq!(Channel::Blue.index(), 2);
    }

    #[test]
    fn default_layout_uses_channel_names() {
        let layout = ChannelLayout::default();
        assert_eq!(layout.control, "rgb");
        for ch in Channel::ALL {
            assert_eq!(layout.led(ch), ch.name());
        }
    }

    #[test]
    fn custom_layout_lookup() {
        let layout = ChannelLayout {
            red: "led:red".into(),
            ..ChannelLayout::default()
        };
        assert_eq!(layout.led(Channel::Red), "led:red");
        assert_eq!(layout.led(Channel::Green), "green");
    }
}
