use crate::conf::types::DetourConfig;
use crate::device::builtin::redirect::RedirectDevice;
use crate::device::core::Device;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Holds the device instances for the lifetime of the server.
///
/// Built once from validated configuration and shared read-only across all
/// request-handling tasks. Construction fails if any device cannot be
/// built; an invalid rule never produces a partially installed filter.
pub struct DeviceRegistry {
    devices: Vec<Arc<dyn Device>>,
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    pub fn load_from_config(&mut self, cfg: &DetourConfig) -> Result<()> {
        if cfg.redirect.enable {
            let device = RedirectDevice::from_config(&cfg.redirect)
                .context("failed to build redirect device")?;

            tracing::info!(
                rules = device.rule_count(),
                "redirect device loaded"
            );

            self.register(Arc::new(device));
        }

        Ok(())
    }

    pub fn register(&mut self, device: Arc<dyn Device>) {
        self.devices.push(device);
    }

    pub fn all(&self) -> &[Arc<dyn Device>] {
        &self.devices
    }
}
