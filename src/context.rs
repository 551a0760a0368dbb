// SPDX-License-Identifier: GPL-3.0-only
//! Per-panel calibration context and the update request API
//!
//! One [`LiveDisplayContext`] exists per panel for the panel's lifetime.
//! Configuration writes store new gains under the context lock and mark
//! the matching [`UpdateKind`] pending; the deferred worker later
//! re-reads the pending set under the same lock and applies it. Multiple
//! requests before the worker runs coalesce into a single run that
//! observes the latest committed values.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use bitflags::bitflags;
use tokio::sync::Notify;

use crate::config::PanelConfig;
use crate::error::{LiveDisplayError, Result};
use crate::panel::PanelDevice;

/// Gain value representing 1.0 (no correction) on a channel
pub const UNITY_GAIN: u32 = 32768;

bitflags! {
    /// Pending update kinds.
    ///
    /// Designed as a capability set: a new tunable adds a flag here and
    /// a dispatch arm in the worker, nothing else.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct UpdateKind: u32 {
        /// Per-channel RGB gain correction
        const RGB = 1 << 0;
    }
}

/// Mutable calibration state, guarded as a unit by the context mutex.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChannelState {
    pub(crate) red: u32,
    pub(crate) green: u32,
    pub(crate) blue: u32,
    pub(crate) pending: UpdateKind,
}

impl ChannelState {
    pub(crate) fn with_gains(red: u32, green: u32, blue: u32) -> Self {
        Self {
            red,
            green,
            blue,
            pending: UpdateKind::empty(),
        }
    }

    /// All three channels at unity means the correction stage can be
    /// bypassed entirely.
    pub(crate) fn is_unity(&self) -> bool {
        self.red == UNITY_GAIN && self.green == UNITY_GAIN && self.blue == UNITY_GAIN
    }
}

/// Per-panel calibration context.
pub struct LiveDisplayContext {
    state: Mutex<ChannelState>,
    /// Owning panel; not kept alive by the context
    owner: Weak<PanelDevice>,
    /// Wakeup for the deferred worker. Signals coalesce: at most one
    /// permit is stored, and the worker re-reads `pending` when it runs.
    work: Notify,
}

impl LiveDisplayContext {
    /// Allocate and wire a context for a panel, seeding gains from the
    /// panel configuration. Fails with `NoSuchDevice` when the panel
    /// handle is already gone, mirroring probe against a vanished
    /// device.
    pub fn attach(panel: &Weak<PanelDevice>, config: &PanelConfig) -> Result<Arc<Self>> {
        let device = panel
            .upgrade()
            .ok_or(LiveDisplayError::NoSuchDevice("panel"))?;
        config.validate()?;

        tracing::debug!(panel = %device.name(), "attaching calibration context");

        let gains = config.default_gains;
        Ok(Arc::new(Self {
            state: Mutex::new(ChannelState::with_gains(gains.red, gains.green, gains.blue)),
            owner: panel.clone(),
            work: Notify::new(),
        }))
    }

    /// Mark update kinds pending and signal the deferred worker.
    ///
    /// Idempotent: if a run is already signaled but not started, the
    /// request is still honored because the worker re-reads `pending`
    /// under the lock. Hardware failures surface later through the
    /// worker's logging, never here.
    pub fn request_update(&self, kinds: UpdateKind) {
        {
            let mut state = self.state.lock().unwrap();
            state.pending |= kinds;
        }
        self.work.notify_one();
    }

    /// Validate and store a new gain triple, then request an RGB update.
    ///
    /// All three values must be within `[0, UNITY_GAIN]` before any of
    /// them is stored; partial application is not permitted.
    pub fn set_gains(&self, red: u32, green: u32, blue: u32) -> Result<()> {
        for (channel, value) in [("red", red), ("green", green), ("blue", blue)] {
            if value > UNITY_GAIN {
                return Err(LiveDisplayError::InvalidArgument(format!(
                    "{channel} gain {value} exceeds {UNITY_GAIN}"
                )));
            }
        }

        {
            let mut state = self.state.lock().unwrap();
            state.red = red;
            state.green = green;
            state.blue = blue;
        }
        self.request_update(UpdateKind::RGB);
        Ok(())
    }

    /// Locked read of the current gain triple.
    pub fn snapshot(&self) -> (u32, u32, u32) {
        let state = self.state.lock().unwrap();
        (state.red, state.green, state.blue)
    }

    /// Update kinds currently awaiting application.
    pub fn pending(&self) -> UpdateKind {
        self.state.lock().unwrap().pending
    }

    pub(crate) fn owner(&self) -> &Weak<PanelDevice> {
        &self.owner
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap()
    }

    pub(crate) fn work_signal(&self) -> &Notify {
        &self.work
    }
}

impl std::fmt::Debug for LiveDisplayContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        write!(
            f,
            "LiveDisplayContext(r: {}, g: {}, b: {}, pending: {:?})",
            state.red, state.green, state.blue, state.pending
        )
    }
}
