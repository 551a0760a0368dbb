//! Textual configuration interface
//!
//! Models the sysfs device-attribute contract: named read/write files
//! with a mode, installed on a panel device's attribute table. The only
//! attribute today is `rgb`, which reads and writes the gain triple as
//! `"r g b"` decimal text.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

use crate::context::LiveDisplayContext;
use crate::error::{LiveDisplayError, Result};
use crate::panel::PanelDevice;

/// Name of the RGB calibration attribute
pub const RGB_ATTR: &str = "rgb";

/// Longest accepted write to the rgb attribute, in bytes
const RGB_INPUT_MAX: usize = 19;

/// One textual device attribute
pub trait DeviceAttribute: Send + Sync {
    fn name(&self) -> &'static str;

    /// Owner-write/group-write/world-read
    fn mode(&self) -> u32 {
        0o664
    }

    /// Format the current value for a read
    fn show(&self) -> Result<String>;

    /// Parse and apply a write, returning the number of bytes consumed
    fn store(&self, buf: &str) -> Result<usize>;
}

/// Per-device attribute registry
pub struct AttributeTable {
    attrs: RwLock<HashMap<&'static str, Arc<dyn DeviceAttribute>>>,
}

impl AttributeTable {
    pub(crate) fn new() -> Self {
        Self {
            attrs: RwLock::new(HashMap::new()),
        }
    }

    /// Install an attribute. Fails if one with the same name already
    /// exists on this device.
    pub fn register(&self, attr: Arc<dyn DeviceAttribute>) -> Result<()> {
        let mut attrs = self.attrs.write().unwrap();
        let name = attr.name();
        if attrs.contains_key(name) {
            return Err(LiveDisplayError::Registration { name });
        }
        attrs.insert(name, attr);
        Ok(())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.attrs.read().unwrap().keys().copied().collect()
    }

    pub fn show(&self, name: &str) -> Result<String> {
        self.lookup(name)?.show()
    }

    pub fn store(&self, name: &str, buf: &str) -> Result<usize> {
        self.lookup(name)?.store(buf)
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn DeviceAttribute>> {
        self.attrs
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or(LiveDisplayError::NoSuchDevice("attribute"))
    }
}

/// The `rgb` attribute: user-level calibration and color temperature.
pub struct RgbAttribute {
    ctx: Weak<LiveDisplayContext>,
}

impl DeviceAttribute for RgbAttribute {
    fn name(&self) -> &'static str {
        RGB_ATTR
    }

    fn show(&self) -> Result<String> {
        let ctx = self
            .ctx
            .upgrade()
            .ok_or(LiveDisplayError::NoSuchDevice("context"))?;
        let (r, g, b) = ctx.snapshot();
        Ok(format!("{r} {g} {b}\n"))
    }

    fn store(&self, buf: &str) -> Result<usize> {
        let ctx = self
            .ctx
            .upgrade()
            .ok_or(LiveDisplayError::NoSuchDevice("context"))?;

        if buf.len() > RGB_INPUT_MAX {
            return Err(LiveDisplayError::InvalidArgument(format!(
                "input exceeds {RGB_INPUT_MAX} bytes"
            )));
        }

        let (r, g, b) = parse_rgb(buf)?;
        ctx.set_gains(r, g, b)?;
        Ok(buf.len())
    }
}

/// Parse up to three whitespace-separated channel values. Missing
/// trailing channels default to 0; a token that is not an unsigned
/// decimal integer rejects the whole write.
fn parse_rgb(buf: &str) -> Result<(u32, u32, u32)> {
    let mut channels = [0u32; 3];
    for (slot, token) in channels.iter_mut().zip(buf.split_whitespace()) {
        *slot = token.parse().map_err(|_| {
            LiveDisplayError::InvalidArgument(format!("not a channel value: {token:?}"))
        })?;
    }
    Ok((channels[0], channels[1], channels[2]))
}

/// Install the `rgb` attribute on a panel device.
///
/// Called by the panel driver once the framebuffer device exists; a
/// failure is logged and returned to the caller.
pub fn register_rgb(panel: &PanelDevice, ctx: &Arc<LiveDisplayContext>) -> Result<()> {
    let attr = Arc::new(RgbAttribute {
        ctx: Arc::downgrade(ctx),
    });
    if let Err(err) = panel.attributes().register(attr) {
        tracing::error!(panel = %panel.name(), "sysfs creation failed: {err}");
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_triple() {
        assert_eq!(parse_rgb("25828 17347 8192").unwrap(), (25828, 17347, 8192));
    }

    #[test]
    fn missing_channels_default_to_zero() {
        assert_eq!(parse_rgb("100").unwrap(), (100, 0, 0));
        assert_eq!(parse_rgb("").unwrap(), (0, 0, 0));
    }

    #[test]
    fn extra_tokens_are_ignored() {
        assert_eq!(parse_rgb("1 2 3 4").unwrap(), (1, 2, 3));
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        assert!(parse_rgb("1 two 3").is_err());
        assert!(parse_rgb("-5 0 0").is_err());
    }

    #[test]
    fn trailing_newline_is_accepted() {
        assert_eq!(parse_rgb("1 2 3\n").unwrap(), (1, 2, 3));
    }
}
