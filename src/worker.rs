// SPDX-License-Identifier: GPL-3.0-only
//! Deferred update worker
//!
//! Each panel context gets one consumer task, so a panel's updates are
//! applied strictly one run at a time while independent panels proceed
//! concurrently. A run resolves the owning panel, checks power state,
//! then applies every pending update kind under the context lock.
//!
//! Pending bits survive an aborted run: a panel that is not interactive
//! or a pipeline that reports failure leaves the bit set, and the update
//! is re-attempted on the next request.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::context::{LiveDisplayContext, UpdateKind};
use crate::pcc;

/// Execute one pass of the worker for the given context.
///
/// The pass is a no-op when the owning panel is gone or not in an
/// interactive power state; in both cases `pending` is left untouched.
pub fn run_once(ctx: &LiveDisplayContext) {
    let Some(panel) = ctx.owner().upgrade() else {
        return;
    };

    if !panel.power_state().is_interactive() {
        tracing::debug!(panel = %panel.name(), "panel not interactive, update deferred");
        return;
    }

    let mut state = ctx.lock_state();

    if state.pending.contains(UpdateKind::RGB) {
        match pcc::program(&panel, &state) {
            Ok(()) => {
                state.pending.remove(UpdateKind::RGB);
            }
            Err(err) => {
                // Bit stays set so the next request retries the write
                tracing::error!(panel = %panel.name(), "color correction update failed: {err:?}");
            }
        }
    }
}

/// Spawn the single consumer task for a context.
///
/// The task parks on the context's work signal and executes one pass
/// per wakeup. Signals arriving during a pass leave a stored permit, so
/// no request is lost; signals arriving while parked coalesce into one
/// run. The loop exits once the owning panel has been dropped.
pub fn spawn(ctx: Arc<LiveDisplayContext>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            ctx.work_signal().notified().await;
            if ctx.owner().upgrade().is_none() {
                break;
            }
            run_once(&ctx);
        }
    })
}
