use serde::{Deserialize, Serialize};

use crate::context::UNITY_GAIN;
use crate::error::{LiveDisplayError, Result};

/// Per-channel gain triple, 0-32768 where 32768 is unity (1.0)
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ChannelGains {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl Default for ChannelGains {
    fn default() -> Self {
        // No correction until user space supplies explicit values
        Self {
            red: UNITY_GAIN,
            green: UNITY_GAIN,
            blue: UNITY_GAIN,
        }
    }
}

impl ChannelGains {
    pub fn new(red: u32, green: u32, blue: u32) -> Self {
        Self { red, green, blue }
    }
}

/// Static panel description, the stand-in for the device-tree node the
/// panel driver hands us at probe time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Logical framebuffer index of the panel
    pub index: u32,
    /// Human-readable panel name, used in log output
    pub name: String,
    /// Gains applied until user space writes the rgb attribute
    pub default_gains: ChannelGains,
}

impl PanelConfig {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            default_gains: ChannelGains::default(),
        }
    }

    /// Reject default gains outside the hardware range before any of them
    /// are stored into a context.
    pub fn validate(&self) -> Result<()> {
        let gains = &self.default_gains;
        for (channel, value) in [
            ("red", gains.red),
            ("green", gains.green),
            ("blue", gains.blue),
        ] {
            if value > UNITY_GAIN {
                return Err(LiveDisplayError::InvalidArgument(format!(
                    "default {channel} gain {value} exceeds {UNITY_GAIN}"
                )));
            }
        }
        Ok(())
    }
}
