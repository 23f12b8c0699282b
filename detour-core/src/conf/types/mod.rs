mod redirect;
mod server;

pub use redirect::*;
pub use server::*;

use crate::conf::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetourConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub redirect: RedirectDeviceConfig,
}

impl DetourConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        crate::conf::loader::load_config(path.as_ref())
    }

    /// Structural checks that do not require compiling rules. Rule patterns
    /// and status codes are validated when the redirect device is built.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidListen {
                addr: self.server.listen.clone(),
            });
        }

        self.upstream.host_port()?;

        Ok(())
    }
}
