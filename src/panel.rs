// SPDX-License-Identifier: GPL-3.0-only
//! Panel device handle and the color pipeline seam
//!
//! The embedding panel/framebuffer driver supplies a [`ColorPipeline`]
//! implementation; everything this subsystem knows about the hardware
//! goes through it. [`PanelDevice`] is the shared per-panel handle the
//! rest of the crate holds weak references into.

use std::sync::{Arc, Mutex};

use crate::pcc::PccConfig;
use crate::sysfs::AttributeTable;

/// Logical framebuffer index of a panel
pub type PanelIndex = u32;

/// Panel power state as reported by the panel driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelPowerState {
    #[default]
    Off,
    On,
    /// Low-power always-on mode, display content retained
    Doze,
    /// Low-power mode with the display path suspended
    DozeSuspend,
}

impl PanelPowerState {
    /// True only when the panel is fully on and accepting pipeline
    /// configuration. Updates are deferred in every other state.
    pub fn is_interactive(self) -> bool {
        matches!(self, PanelPowerState::On)
    }
}

/// The display pipeline's color correction configuration entry point
pub trait ColorPipeline: Send + Sync {
    /// Apply a polynomial color correction configuration.
    fn configure_pcc(&self, cfg: &PccConfig) -> anyhow::Result<()>;
}

/// Shared handle for one physical panel.
///
/// Plays the role of the framebuffer device: it carries the logical
/// index, the current power state, the pipeline sink and the device's
/// attribute table. Calibration contexts hold only weak references to
/// it, so panel teardown is never blocked by the subsystem.
pub struct PanelDevice {
    index: PanelIndex,
    name: String,
    power: Mutex<PanelPowerState>,
    pipeline: Box<dyn ColorPipeline>,
    attributes: AttributeTable,
}

impl PanelDevice {
    pub fn new(
        index: PanelIndex,
        name: impl Into<String>,
        pipeline: Box<dyn ColorPipeline>,
    ) -> Arc<Self> {
        Arc::new(Self {
            index,
            name: name.into(),
            power: Mutex::new(PanelPowerState::Off),
            pipeline,
            attributes: AttributeTable::new(),
        })
    }

    pub fn index(&self) -> PanelIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn power_state(&self) -> PanelPowerState {
        *self.power.lock().unwrap()
    }

    /// Called by the panel driver on blank/unblank transitions.
    pub fn set_power_state(&self, state: PanelPowerState) {
        *self.power.lock().unwrap() = state;
        tracing::debug!(panel = %self.name, ?state, "panel power state changed");
    }

    pub fn pipeline(&self) -> &dyn ColorPipeline {
        self.pipeline.as_ref()
    }

    /// Attribute table exposed on this device
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }
}

impl std::fmt::Debug for PanelDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PanelDevice(index: {}, name: {}, power: {:?})",
            self.index,
            self.name,
            self.power_state()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_on_is_interactive() {
        assert!(PanelPowerState::On.is_interactive());
        assert!(!PanelPowerState::Off.is_interactive());
        assert!(!PanelPowerState::Doze.is_interactive());
        assert!(!PanelPowerState::DozeSuspend.is_interactive());
    }
}
