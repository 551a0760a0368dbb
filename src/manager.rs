// SPDX-License-Identifier: GPL-3.0-only
//! Panel context registry
//!
//! Maps logical panel indices to their attached calibration contexts so
//! the embedding driver (and any daemon-side tooling) can look contexts
//! up after probe. All [`PanelManager::global`] handles share one
//! process-wide table; [`PanelManager::new`] creates an isolated one.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::RwLock;

use crate::context::LiveDisplayContext;
use crate::panel::PanelIndex;

type ContextMap = HashMap<PanelIndex, Arc<LiveDisplayContext>>;

static GLOBAL_PANELS: Lazy<Arc<RwLock<ContextMap>>> =
    Lazy::new(|| Arc::new(RwLock::new(HashMap::new())));

/// Registry of attached panel contexts
pub struct PanelManager {
    panels: Arc<RwLock<ContextMap>>,
}

impl PanelManager {
    /// Create an isolated registry (one embedding driver instance).
    pub fn new() -> Self {
        Self {
            panels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Handle to the shared process-wide registry.
    pub fn global() -> Self {
        Self {
            panels: GLOBAL_PANELS.clone(),
        }
    }

    pub async fn insert(&self, index: PanelIndex, ctx: Arc<LiveDisplayContext>) {
        let mut panels = self.panels.write().await;
        if panels.insert(index, ctx).is_some() {
            tracing::warn!(index, "replaced existing calibration context");
        }
    }

    pub async fn remove(&self, index: PanelIndex) -> Option<Arc<LiveDisplayContext>> {
        self.panels.write().await.remove(&index)
    }

    pub async fn get(&self, index: PanelIndex) -> Option<Arc<LiveDisplayContext>> {
        self.panels.read().await.get(&index).cloned()
    }

    pub async fn ids(&self) -> Vec<PanelIndex> {
        self.panels.read().await.keys().copied().collect()
    }

    pub async fn count(&self) -> usize {
        self.panels.read().await.len()
    }
}

impl Clone for PanelManager {
    fn clone(&self) -> Self {
        Self {
            panels: Arc::clone(&self.panels),
        }
    }
}

impl Default for PanelManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelConfig;
    use crate::panel::{ColorPipeline, PanelDevice};
    use crate::pcc::PccConfig;

    struct NullPipeline;

    impl ColorPipeline for NullPipeline {
        fn configure_pcc(&self, _cfg: &PccConfig) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn insert_get_remove() {
        let manager = PanelManager::new();
        let panel = PanelDevice::new(3, "external", Box::new(NullPipeline));
        let ctx = LiveDisplayContext::attach(
            &Arc::downgrade(&panel),
            &PanelConfig::new(3, "external"),
        )
        .unwrap();

        manager.insert(3, ctx).await;
        assert_eq!(manager.count().await, 1);
        assert_eq!(manager.ids().await, vec![3]);
        assert!(manager.get(3).await.is_some());

        assert!(manager.remove(3).await.is_some());
        assert_eq!(manager.count().await, 0);
        assert!(manager.get(3).await.is_none());
    }
}
