// SPDX-License-Identifier: GPL-3.0-only
//! Polynomial color correction (PCC) command path
//!
//! Simple color temperature interface: gains of 0-32768 per channel
//! represent 0.0 -> 1.0. An adjustment for ~3500K would be roughly
//! 32768 / 25828 / 17347 for r/g/b. Only the diagonal (per-channel
//! gain) terms are programmed; cross-channel terms stay zero.

use crate::context::{ChannelState, UNITY_GAIN};
use crate::panel::PanelDevice;

/// Enable the correction stage
pub const PCC_OPS_ENABLE: u32 = 0x1;
/// Read back the current configuration
pub const PCC_OPS_READ: u32 = 0x2;
/// Commit the configuration immediately
pub const PCC_OPS_WRITE: u32 = 0x4;
/// Bypass the correction stage
pub const PCC_OPS_DISABLE: u32 = 0x8;

/// Logical block enumeration offset of display 0
pub const PCC_BLOCK_DISP_0: u32 = 0x10;

/// Polynomial coefficients for one output channel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PccCoeff {
    pub c: u32,
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub rr: u32,
    pub gg: u32,
    pub bb: u32,
    pub rg: u32,
    pub gb: u32,
    pub rb: u32,
    pub rgb: u32,
}

/// One color correction command.
///
/// Built fresh on every call; the programmer holds no state between
/// invocations and is safe to reenter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PccConfig {
    /// Target logical display block
    pub block: u32,
    /// PCC_OPS_* flags
    pub ops: u32,
    pub r: PccCoeff,
    pub g: PccCoeff,
    pub b: PccCoeff,
}

/// Translate the context's current gains into a PCC command and submit
/// it to the panel's pipeline.
///
/// Takes the locked channel state by reference: the only way to reach a
/// `ChannelState` is through the context's mutex guard, so the caller
/// necessarily holds the lock.
pub(crate) fn program(panel: &PanelDevice, state: &ChannelState) -> anyhow::Result<()> {
    debug_assert!(
        state.red <= UNITY_GAIN && state.green <= UNITY_GAIN && state.blue <= UNITY_GAIN
    );

    tracing::info!(
        panel = %panel.name(),
        r = state.red,
        g = state.green,
        b = state.blue,
        "programming color correction"
    );

    let ops = if state.is_unity() {
        PCC_OPS_DISABLE
    } else {
        PCC_OPS_ENABLE
    };

    let mut cfg = PccConfig {
        block: PCC_BLOCK_DISP_0 + panel.index(),
        ops: ops | PCC_OPS_WRITE,
        ..PccConfig::default()
    };
    cfg.r.r = state.red;
    cfg.g.g = state.green;
    cfg.b.b = state.blue;

    panel.pipeline().configure_pcc(&cfg)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::panel::ColorPipeline;

    struct Recorder(Arc<Mutex<Vec<PccConfig>>>);

    impl ColorPipeline for Recorder {
        fn configure_pcc(&self, cfg: &PccConfig) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(*cfg);
            Ok(())
        }
    }

    fn recording_panel(index: u32) -> (Arc<PanelDevice>, Arc<Mutex<Vec<PccConfig>>>) {
        let commands = Arc::new(Mutex::new(Vec::new()));
        let panel = PanelDevice::new(index, "test", Box::new(Recorder(commands.clone())));
        (panel, commands)
    }

    #[test]
    fn unity_gains_disable_correction() {
        let (panel, commands) = recording_panel(0);
        let state = ChannelState::with_gains(UNITY_GAIN, UNITY_GAIN, UNITY_GAIN);

        program(&panel, &state).unwrap();

        let cfg = commands.lock().unwrap()[0];
        assert_eq!(cfg.ops, PCC_OPS_DISABLE | PCC_OPS_WRITE);
        assert_eq!(cfg.block, PCC_BLOCK_DISP_0);
    }

    #[test]
    fn non_unity_gains_enable_and_write() {
        let (panel, commands) = recording_panel(1);
        let state = ChannelState::with_gains(25828, 17347, 8192);

        program(&panel, &state).unwrap();

        let cfg = commands.lock().unwrap()[0];
        assert_eq!(cfg.ops, PCC_OPS_ENABLE | PCC_OPS_WRITE);
        assert_eq!(cfg.block, PCC_BLOCK_DISP_0 + 1);
        assert_eq!((cfg.r.r, cfg.g.g, cfg.b.b), (25828, 17347, 8192));
    }

    #[test]
    fn cross_channel_terms_stay_zero() {
        let (panel, commands) = recording_panel(0);
        let state = ChannelState::with_gains(100, 200, 300);

        program(&panel, &state).unwrap();

        let cfg = commands.lock().unwrap()[0];
        for coeff in [cfg.r, cfg.g, cfg.b] {
            assert_eq!(coeff.c, 0);
            assert_eq!((coeff.rr, coeff.gg, coeff.bb), (0, 0, 0));
            assert_eq!((coeff.rg, coeff.gb, coeff.rb, coeff.rgb), (0, 0, 0, 0));
        }
        assert_ne!((cfg.r.r, cfg.g.g, cfg.b.b), (0, 0, 0));
    }
}
