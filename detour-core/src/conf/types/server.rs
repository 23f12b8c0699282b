use crate::conf::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// e.g. "0.0.0.0:8080"
    pub listen: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// e.g. "127.0.0.1:3000"
    pub addr: String,
}

impl UpstreamConfig {
    /// Split the configured address into host and port.
    pub fn host_port(&self) -> Result<(String, u16), ConfigError> {
        let invalid = || ConfigError::InvalidUpstream {
            addr: self.addr.clone(),
        };

        let (host, port) = self.addr.rsplit_once(':').ok_or_else(invalid)?;

        if host.is_empty() {
            return Err(invalid());
        }

        let port = port.parse::<u16>().map_err(|_| invalid())?;

        Ok((host.to_string(), port))
    }
}
