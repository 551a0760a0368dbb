// SPDX-License-Identifier: GPL-3.0-only
//! LiveDisplay display color calibration.
//!
//! Per-panel RGB gain correction for panel drivers: user space writes a
//! gain triple to the panel's `rgb` attribute, the subsystem coalesces
//! changes into a pending-update set, and a per-panel worker task
//! programs the display pipeline's polynomial color correction block
//! asynchronously, serialized against concurrent writes and panel power
//! transitions.
//!
//! The embedding driver supplies the hardware side: a
//! [`panel::ColorPipeline`] implementation and power-state updates on
//! the [`panel::PanelDevice`] handle. Wiring a panel up looks like:
//!
//! ```no_run
//! use std::sync::Arc;
//! use livedisplay::{LiveDisplayContext, PanelConfig, PanelDevice, sysfs, worker};
//! # struct Pipeline;
//! # impl livedisplay::ColorPipeline for Pipeline {
//! #     fn configure_pcc(&self, _: &livedisplay::PccConfig) -> anyhow::Result<()> { Ok(()) }
//! # }
//!
//! # async fn probe() -> livedisplay::Result<()> {
//! let panel = PanelDevice::new(0, "primary", Box::new(Pipeline));
//! let ctx = LiveDisplayContext::attach(&Arc::downgrade(&panel), &PanelConfig::new(0, "primary"))?;
//! sysfs::register_rgb(&panel, &ctx)?;
//! worker::spawn(ctx);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod manager;
pub mod panel;
pub mod pcc;
pub mod sysfs;
pub mod worker;

pub use config::{ChannelGains, PanelConfig};
pub use context::{LiveDisplayContext, UNITY_GAIN, UpdateKind};
pub use error::{LiveDisplayError, Result};
pub use manager::PanelManager;
pub use panel::{ColorPipeline, PanelDevice, PanelPowerState};
pub use pcc::PccConfig;
